use std::path::Path;

use blayer::prelude::*;
use linedata::prelude::*;

use crate::script::errors::PlotScriptError;
use crate::script::{PlotScript, ReadyPlots, TableRef};

/// A profile as ACE would export it, normal to the wall.
fn profile() -> Table {
  return Table::from_columns([
    ("X", vec![7.9, 7.9, 7.9, 7.9]),
    ("Z", vec![0.0, 1e-4, 1e-3, 1e-2]),
    ("U", vec![0.0, 20.0, 60.0, 85.0]),
    ("RHO", vec![1.2, 1.2, 1.2, 1.2]),
    ("Vislam", vec![1.8e-5, 1.8e-5, 1.8e-5, 1.8e-5]),
    ("VIS_T", vec![0.0, 1e-4, 1e-3, 1e-3]),
    ("SkinFrictionCoefficient", vec![0.003, 0.0, 0.0, 0.0]),
  ]).unwrap();
}

/// A line along the wall, as ACE would export it.
fn wall_line() -> Table {
  return Table::from_columns([
    ("X", vec![0.5, 2.0, 4.0, 7.5]),
    ("Z", vec![0.0, 0.0, 0.0, 0.0]),
    ("U", vec![0.0, 0.0, 0.0, 0.0]),
    ("RHO", vec![1.2, 1.2, 1.2, 1.2]),
    ("Vislam", vec![1.8e-5, 1.8e-5, 1.8e-5, 1.8e-5]),
    ("VIS_T", vec![0.0, 0.0, 0.0, 0.0]),
    ("SkinFrictionCoefficient", vec![0.0035, 0.003, 0.0027, 0.0025]),
  ]).unwrap();
}

/// Writes a dataset into a directory and returns a script reading it.
fn script_for(dir: &Path) -> String {
  let data = dir.join("ace");
  std::fs::create_dir(&data).unwrap();
  write_table_file(&profile(), data.join("case_line_0.dat")).unwrap();
  write_table_file(&wall_line(), data.join("case_line_1.dat")).unwrap();
  return format!(
    "output_dir = '{}'\n\
     correlation = {{ x_min = 0.1, x_max = 8, points = 50 }}\n\
     [datasets.ace]\n\
     dir = '{}'\n\
     u_ref = 85\n\
     [free_stream]\n\
     dataset = 'ace'\n\
     [[chart]]\n\
     kind = 'velocity_profile'\n\
     file = 'profile.svg'\n\
     [[chart.series]]\n\
     dataset = 'ace'\n\
     table = 0\n\
     label = 'ACE'\n\
     [[chart]]\n\
     kind = 'law_of_the_wall'\n\
     title = 'Spalart model'\n\
     [[chart.series]]\n\
     dataset = 'ace'\n\
     table = 'case_line_0'\n\
     label = 'ACE'\n\
     color = 'blue'\n\
     [[chart]]\n\
     kind = 'friction_coefficient'\n\
     ylim = [0, 0.008]\n\
     [[chart.series]]\n\
     dataset = 'ace'\n\
     table = 1\n\
     label = 'ACE'\n\
     stroke = 'dashed'\n",
    dir.join("plots").display(),
    data.display()
  );
}

/// Parses a script and loads its data.
fn ready(text: &str, strict: bool) -> Result<ReadyPlots, PlotScriptError> {
  let script: PlotScript = toml::from_str(text).unwrap();
  return script.prepare(strict);
}

#[test]
fn test_script_defaults() {
  let text = "[datasets.cfx]\n\
              dir = 'extracted_data/cfx'\n\
              solver = 'cfx'\n\
              u_ref = 85.0\n\
              [[chart]]\n\
              kind = 'law_of_the_wall'\n\
              [[chart.series]]\n\
              dataset = 'cfx'\n\
              table = 'flat_plate_line_0'\n";
  let script: PlotScript = toml::from_str(text).unwrap();
  assert_eq!(script.output_dir, Path::new("plots"));
  assert_eq!(script.datasets["cfx"].solver, Solver::Cfx);
  assert!(script.free_stream.is_none());
  assert_eq!(script.correlation.points, 1500);
  assert_eq!(script.charts.len(), 1);
  let chart = &script.charts[0];
  assert!(chart.theory);
  assert_eq!(chart.file_name(0), "chart_1.svg");
  assert_eq!(chart.series[0].table, TableRef::Name("flat_plate_line_0".into()));
  assert_eq!(chart.series[0].width, 2);
  assert_eq!(chart.series[0].stroke, Stroke::Solid);
  assert!(chart.series[0].color.is_none());
}

#[test]
fn test_prepare_derives_wall_units() {
  let dir = tempfile::tempdir().unwrap();
  let plots = ready(&script_for(dir.path()), true).unwrap();
  let ace = &plots.datasets["ace"];
  assert_eq!(ace.tables.len(), 2);
  let t = &ace.tables[0];
  assert_eq!(t.name.as_deref(), Some("case_line_0"));
  let tau = t.column(TAU).unwrap();
  assert!((tau[0] - 0.5 * 1.2 * 85.0 * 85.0 * 0.003).abs() < 1e-9);
  assert!(t.column(UPLUS).unwrap()[3] > 20.0);
  let free = plots.free_stream().unwrap().unwrap();
  assert_eq!(free.velocity, 85.0);
  assert_eq!(free.density, 1.2);
}

#[test]
fn test_build_chart_adds_theory() {
  let dir = tempfile::tempdir().unwrap();
  let plots = ready(&script_for(dir.path()), true).unwrap();
  let law = LawOfTheWall::new().unwrap();
  let free = plots.free_stream().unwrap();
  let profile = plots.build_chart(&plots.charts[0], free.as_ref(), &law).unwrap();
  assert_eq!(profile.series.len(), 1);
  assert_eq!(profile.series[0].color, SeriesColor::CYCLE[0]);
  let wall = plots.build_chart(&plots.charts[1], free.as_ref(), &law).unwrap();
  assert_eq!(wall.title.as_deref(), Some("Spalart model"));
  assert_eq!(wall.series.len(), 2);
  assert_eq!(wall.series[0].color, SeriesColor::Blue);
  assert_eq!(wall.series[1].label, "Law of the wall");
  let friction = plots.build_chart(&plots.charts[2], free.as_ref(), &law).unwrap();
  assert_eq!(friction.ylim, Some((0.0, 0.008)));
  assert_eq!(friction.xlim, Some((0.0, 8.0)));
  assert_eq!(friction.series.len(), 1 + Correlation::all().len());
  assert_eq!(friction.series[0].stroke, Stroke::Dashed);
  assert_eq!(friction.series[1].x.len(), 50);
  // no free stream, no correlations
  let bare = plots.build_chart(&plots.charts[2], None, &law).unwrap();
  assert_eq!(bare.series.len(), 1);
}

#[test]
fn test_draw_all() {
  let dir = tempfile::tempdir().unwrap();
  let plots = ready(&script_for(dir.path()), false).unwrap();
  let written = plots.draw_all().unwrap();
  let out = dir.path().join("plots");
  assert_eq!(
    written,
    vec![out.join("profile.svg"), out.join("chart_2.svg"), out.join("chart_3.svg")]
  );
  for path in written.iter() {
    let svg = std::fs::read_to_string(path).unwrap();
    assert!(svg.contains("<svg"));
  }
}

#[test]
fn test_lookup_errors() {
  let dir = tempfile::tempdir().unwrap();
  let text = script_for(dir.path()).replace("table = 1", "table = 7");
  let plots = ready(&text, false).unwrap();
  let e = plots.draw_all().err().unwrap();
  assert_eq!(e.to_string(), "dataset \"ace\" has no table #7");
  let other = tempfile::tempdir().unwrap();
  let text = script_for(other.path())
    .replace("[free_stream]\ndataset = 'ace'", "[free_stream]\ndataset = 'cfx'");
  let plots = ready(&text, false).unwrap();
  assert!(matches!(
    plots.free_stream(),
    Err(PlotScriptError::DatasetNotFound(n)) if n == "cfx"
  ));
}

#[test]
fn test_strict_underivable_table() {
  let dir = tempfile::tempdir().unwrap();
  let text = script_for(dir.path());
  // a table with no wall
  let lifted = Table::from_columns(profile().iter().map(|(n, v)| {
    let v: Vec<f64> = if n == "Z" {
      v.iter().map(|z| z + 1.0).collect()
    } else {
      v.to_vec()
    };
    (n.to_string(), v)
  })).unwrap();
  write_table_file(&lifted, dir.path().join("ace").join("case_line_2.dat")).unwrap();
  assert!(matches!(
    ready(&text, true),
    Err(PlotScriptError::Analysis(AnalysisError::NoReferenceRow { .. }))
  ));
  let plots = ready(&text, false).unwrap();
  let tables = &plots.datasets["ace"].tables;
  assert_eq!(tables.len(), 3);
  assert!(tables[2].column(UPLUS).is_none());
  assert!(tables[0].column(UPLUS).is_some());
}
