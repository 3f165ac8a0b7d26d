use std::path::{Path, PathBuf};

use crate::prelude::*;

/// Checks that every directive shows up exactly once, in the given order.
fn assert_once_in_order(text: &str, directives: &[&str]) {
  let mut last = 0;
  for d in directives {
    assert_eq!(text.matches(d).count(), 1, "\"{}\" should appear once", d);
    let at = text.find(d).unwrap();
    assert!(at >= last, "\"{}\" is out of order", d);
    last = at;
  }
}

/// A complete picture job, as the plate case uses it.
fn picture_job(file: &str) -> PictureJob {
  let norm = (35.0_f64.powi(2) + 30.0_f64.powi(2)).sqrt();
  let mut axis = AxisSettings::new(22, 24);
  axis.rect = (10.0, 10.0, 80.0, 40.0);
  axis.xlim = Some((-0.1, 8.1));
  axis.ylim = Some((-0.05, 0.4));
  axis.x_title_font = Font::helvetica(5.0, true);
  return PictureJob {
    file: PathBuf::from(file),
    macro_file: PathBuf::from("macros/picture.mcr"),
    slice: SliceSettings::arbitrary([0.0, 0.0, 0.0], [0.0, -35.0 / norm, 30.0 / norm]),
    levels: LevelSettings { variable: 5, min: 0.0, max: 100.0, count: 21 },
    legend: LegendSettings {
      position: (95.0, 65.0),
      header_font: Font::helvetica(7.0, true),
      ..Default::default()
    },
    colormap: ColormapSettings::default(),
    axis,
    export: ExportSettings { zone: 2, file: "pictures/test2.png".into(), image_width: 1500 },
    frame: FrameSettings::default(),
  };
}

#[test]
fn test_wrap_macro() {
  let m = wrap_macro("$!READDATASET  'a.plt'\n", "C:\\Tecplot");
  assert_eq!(
    m,
    "#!MC 1410\n$!VarSet |MFBD| = 'C:\\Tecplot'\n$!READDATASET  'a.plt'\n\
     $!RemoveVar |MFBD|\n$!Quit"
  );
}

#[test]
fn test_arbitrary_slice_needs_normal() {
  let mut settings = SliceSettings::new(SliceType::Arbitrary, [0.1, 0.15, 0.1]);
  assert!(matches!(slice(&settings), Err(MacroError::MissingNormal)));
  settings.normal = Some([0.0, 0.0, 0.0]);
  assert!(matches!(slice(&settings), Err(MacroError::ZeroNormal)));
  settings.normal = Some([0.0, 2.0, 0.0]);
  let s = slice(&settings).unwrap();
  assert!(s.contains("SLICESURFACE = ARBITRARY"));
  assert!(s.contains("PRIMARYPOSITION{X = 0.1 Y = 0.15 Z = 0.1}"));
  assert!(s.ends_with("$!SLICEATTRIBUTES 1 NORMAL {X = 0 Y = 1 Z = 0}\n"));
  // a failing slice fails the whole picture, before anything is written
  let mut job = picture_job("case.plt");
  job.slice.normal = None;
  assert!(matches!(job.build(DEFAULT_INSTALL_DIR), Err(MacroError::MissingNormal)));
}

#[test]
fn test_indexed_slice() {
  let s = slice(&SliceSettings::new(SliceType::JPlanes, [1.0, 5.0, 1.0])).unwrap();
  assert!(s.contains("SLICESURFACE = JPLANES"));
  assert!(s.contains("PRIMARYPOSITION{I = 1 J = 5 K = 1}"));
  assert!(!s.contains("NORMAL"));
}

#[test]
fn test_levels() {
  let settings = LevelSettings { variable: 5, min: 0.0, max: 100.0, count: 21 };
  let levels = settings.levels().unwrap();
  assert_eq!(levels.len(), 21);
  assert_eq!(levels[0], 0.0);
  assert_eq!(levels[4], 20.0);
  assert_eq!(levels[20], 100.0);
  let s = contour_levels(&settings).unwrap();
  assert!(s.starts_with("$!SETCONTOURVAR\n  VAR = 5\n  CONTOURGROUP = 1\n"));
  assert!(s.contains("  RAWDATA\n21\n0\n5\n10\n"));
  // no accumulated step error in the written levels
  let tenths = LevelSettings { variable: 5, min: 0.0, max: 1.0, count: 11 };
  let levels = tenths.levels().unwrap();
  assert_eq!(levels[3], 0.3);
  assert_eq!(levels[7], 0.7);
  assert_eq!(levels[10], 1.0);
  assert!(contour_levels(&tenths).unwrap().contains("\n0.3\n0.4\n"));
  let odd = LevelSettings { variable: 5, min: 0.1, max: 0.7, count: 7 };
  assert_eq!(odd.levels().unwrap().last(), Some(&0.7));
  let single = LevelSettings { count: 1, ..settings.clone() };
  assert_eq!(single.levels().unwrap(), vec![0.0]);
  let none = LevelSettings { count: 0, ..settings };
  assert!(matches!(none.levels(), Err(MacroError::BadLevels { count: 0 })));
}

#[test]
fn test_extract_from_polyline() {
  let line = PolyLine::segment(
    Point::new(7.9, 0.15, 0.0),
    Point::new(7.9, 0.15, 0.35),
    1500
  );
  let s = extract_from_polyline(&line, "out/case_line_0.dat").unwrap();
  assert_eq!(
    s,
    "$!EXTRACTFROMPOLYLINE\nEXTRACTLINEPOINTSONLY = NO\nEXTRACTTHROUGHVOLUME = YES\n\
     EXTRACTTOFILE = YES\nFNAME = 'out/case_line_0.dat'\nNUMPTS = 1500\nRAWDATA\n2\n\
     7.9 0.15 0\n7.9 0.15 0.35\n"
  );
  assert!((line.length() - 0.35).abs() < 1e-12);
  let empty = PolyLine::new(Vec::new(), 10);
  assert!(matches!(
    extract_from_polyline(&empty, "x.dat"),
    Err(MacroError::EmptyPolyline)
  ));
}

#[test]
fn test_alter_data() {
  assert_eq!(
    alter_data("{X/h} = {X}", false, DataType::Single),
    "$!ALTERDATA\n  EQUATION = '{X/h} = {X}'\n  IGNOREDIVIDEBYZERO = NO\n  DATATYPE = SINGLE\n"
  );
  assert!(alter_data("{A} = 1", true, DataType::Double).contains("IGNOREDIVIDEBYZERO = YES"));
}

#[test]
fn test_colormap_range_only_when_continuous() {
  let mut settings = ColormapSettings {
    distribution: ColorDistribution::Banded,
    colormap: ColorMap::SmallRainbow,
    continuous_range: Some((0.0, 90.0)),
  };
  let banded = colormap(&settings);
  assert!(banded.contains("COLORMAPNAME = 'Small Rainbow'"));
  assert!(banded.contains("COLORMAPDISTRIBUTION = BANDED"));
  assert!(!banded.contains("CMIN"));
  settings.distribution = ColorDistribution::Continuous;
  let continuous = colormap(&settings);
  assert!(continuous.contains("CONTINUOUSCOLOR{CMIN = 0}"));
  assert!(continuous.contains("CONTINUOUSCOLOR{CMAX = 90}"));
}

#[test]
fn test_axis_ranges_need_both_limits() {
  let mut axis = AxisSettings::new(1, 3);
  axis.xlim = Some((0.0, 1.0));
  assert!(!two_d_axis(&axis).contains("RANGEMIN"));
  axis.ylim = Some((2.0, 3.0));
  let s = two_d_axis(&axis);
  assert!(s.contains("PRESERVEAXISSCALE = YES"));
  assert!(s.contains("RANGEMIN = 2\n    RANGEMAX = 3"));
  assert!(s.contains("      X1 = 10\n      Y1 = 10\n      X2 = 90\n      Y2 = 90\n"));
  let fonts = axis_fonts(&axis);
  assert!(fonts.contains("$!TWODAXIS XDETAIL{TITLE{TEXTSHAPE{FONTFAMILY = 'Helvetica'}}}\n"));
  assert!(fonts.contains("$!TWODAXIS YDETAIL{TICKLABEL{TEXTSHAPE{HEIGHT = 3}}}\n"));
  assert!(fonts.contains("$!TWODAXIS YDETAIL{TITLE{OFFSET = 5}}\n"));
}

#[test]
fn test_axis_scale_flags() {
  let parse = |extra: &str| -> AxisSettings {
    return toml::from_str(&format!(
      "x_var = 22\ny_var = 24\nxlim = [0, 1]\nylim = [0, 1]\n{}",
      extra
    )).unwrap();
  };
  let scale_line = |axis: &AxisSettings| -> String {
    return two_d_axis(axis)
      .lines()
      .find(|l| l.contains("PRESERVEAXISSCALE"))
      .unwrap()
      .trim()
      .to_string();
  };
  assert_eq!(scale_line(&parse("")), "PRESERVEAXISSCALE = YES");
  assert!(AxisSettings::new(1, 2).preserves_scale());
  assert_eq!(
    scale_line(&parse("preserve_axis_length = true")),
    "PRESERVEAXISSCALE = NO"
  );
  assert_eq!(
    scale_line(&parse("preserve_axis_length = false")),
    "PRESERVEAXISSCALE = YES"
  );
  assert_eq!(
    scale_line(&parse("preserve_axis_scale = false")),
    "PRESERVEAXISSCALE = NO"
  );
  // the length flag wins
  let both = parse("preserve_axis_scale = false\npreserve_axis_length = false");
  assert!(both.preserves_scale());
}

#[test]
fn test_zone_lists() {
  assert_eq!(active_field_maps(&[2]), "$!ACTIVEFIELDMAPS = [2]\n");
  assert_eq!(delete_zones(&[1, 2, 3]), "$!DELETEZONES [1,2,3]\n");
}

#[test]
fn test_picture_macro_order() {
  let m = picture_job("case.lay").build(DEFAULT_INSTALL_DIR).unwrap();
  assert_once_in_order(&m, &[
    "#!MC 1410",
    "$!VarSet |MFBD|",
    "$!OPENLAYOUT  'case.lay'",
    "$!SLICELAYERS SHOW = YES",
    "$!SETCONTOURVAR",
    "$!CONTOURLEVELS NEW",
    "LEGEND{ISVERTICAL = YES}",
    "LEGEND{HEADERTEXTSHAPE{FONTFAMILY",
    "COLORMAPNAME = 'Modern'",
    "$!CREATESLICEZONES",
    "$!FIELDLAYERS SHOWCONTOUR = YES",
    "$!PLOTTYPE = CARTESIAN2D",
    "XDETAIL{TITLE{OFFSET = 5}}",
    "$!ACTIVEFIELDMAPS = [2]",
    "$!FRAMELAYOUT HEIGHT = 8",
    "$!EXPORTSETUP EXPORTFNAME = 'pictures/test2.png'",
    "$!EXPORTSETUP IMAGEWIDTH = 1500",
    "$!DELETEZONES [2]",
    "$!PLOTTYPE = CARTESIAN3D",
    "$!RemoveVar |MFBD|",
    "$!Quit",
  ]);
  assert!(!m.contains("READDATASET"));
  let from_data = picture_job("case.plt").build(DEFAULT_INSTALL_DIR).unwrap();
  assert!(from_data.contains("$!READDATASET  'case.plt'\n$!SLICELAYERS"));
  assert_eq!(
    picture_job("case.plt").expected_outputs().unwrap(),
    vec![PathBuf::from("pictures/test2.png")]
  );
}

#[test]
fn test_picture_job_from_toml() {
  let job: PictureJob = toml::from_str(r#"
    file = "data/average_grid_density_sp_al.lay"
    macro = "macros/picture_creation.mcr"
    [slice]
    type = "arbitrary"
    position = [0, 0, 0]
    normal = [0, -0.759, 0.651]
    [levels]
    variable_number = 5
    min = 0
    max = 100
    count = 21
    [legend]
    position = [95, 65]
    header_font = { height = 7, bold = true }
    [colormap]
    distribution = "banded"
    colormap = "modern"
    [axis]
    x_var = 22
    y_var = 24
    rect = [10, 10, 80, 40]
    xlim = [-0.1, 8.1]
    ylim = [-0.05, 0.4]
    [export]
    zone = 2
    file = "pictures/test2.png"
    image_width = 1500
  "#).unwrap();
  assert_eq!(job.slice.slice_type, SliceType::Arbitrary);
  assert_eq!(job.legend.header_font.height, 7.0);
  assert!(job.legend.header_font.bold);
  assert_eq!(job.legend.header_font.family, "Helvetica");
  assert_eq!(job.legend.row_spacing, 1.2);
  assert_eq!(job.axis.x_title_offset, 5.0);
  assert_eq!(job.frame, FrameSettings { width: 9.0, height: 8.0 });
  assert!(job.build(DEFAULT_INSTALL_DIR).is_ok());
}

#[test]
fn test_point_from_toml() {
  let line: PolyLine = toml::from_str(
    "nodes = [[0, 0.15, 0], [8, 0.15, 0]]\nnumpoints = 2000\n"
  ).unwrap();
  assert_eq!(line.nodes[1], Point::new(8.0, 0.15, 0.0));
  assert_eq!(line.points, 2000);
}

/// Makes a directory with a few data files and a stray text file.
fn data_dir() -> tempfile::TempDir {
  let dir = tempfile::tempdir().unwrap();
  for name in ["b_case.plt", "a_case.plt", "notes.txt"] {
    std::fs::write(dir.path().join(name), "").unwrap();
  }
  return dir;
}

#[test]
fn test_line_extraction() {
  let dir = data_dir();
  let lines = vec![
    PolyLine::segment(Point::new(7.9, 0.15, 0.0), Point::new(7.9, 0.15, 0.35), 1500),
    PolyLine::segment(Point::new(0.0, 0.15, 0.0), Point::new(8.0, 0.15, 0.0), 2000),
  ];
  let job = LineExtraction {
    data_dir: dir.path().to_path_buf(),
    output_dir: PathBuf::from("extracted"),
    sets: PolylineSets::Shared(lines.clone()),
    macro_file: dir.path().join("extract.mcr"),
  };
  let body = job.body().unwrap();
  assert_eq!(body.matches("$!READDATASET").count(), 2);
  assert_eq!(body.matches("$!EXTRACTFROMPOLYLINE").count(), 4);
  assert!(body.find("a_case.plt").unwrap() < body.find("b_case.plt").unwrap());
  assert!(!body.contains("notes.txt"));
  let outputs = job.expected_outputs().unwrap();
  assert_eq!(outputs.len(), 4);
  assert_eq!(outputs[0], Path::new("extracted").join("a_case_line_0.dat"));
  assert_eq!(outputs[3], Path::new("extracted").join("b_case_line_1.dat"));
  // per-file sets must match the number of files
  let mismatched = LineExtraction {
    sets: PolylineSets::PerFile(vec![lines.clone(), lines.clone(), lines]),
    ..job
  };
  assert!(matches!(
    mismatched.body(),
    Err(MacroError::CountMismatch { files: 2, sets: 3 })
  ));
}

#[test]
fn test_alter_data_job() {
  let job = AlterDataJob {
    file: PathBuf::from("data/plate.plt"),
    macro_file: PathBuf::from("macros/alterdata.mcr"),
    equations: vec!["{X/h} = {X}".into(), "{Y/h} = {Y}".into()],
    ignore_divide_by_zero: false,
    data_type: DataType::Single,
    layout: None,
  };
  assert_eq!(job.layout_file(), PathBuf::from("data/plate.lay"));
  let m = job.build("C:\\Tecplot").unwrap();
  assert_once_in_order(&m, &[
    "$!READDATASET  'data/plate.plt'",
    "'{X/h} = {X}'",
    "'{Y/h} = {Y}'",
    "$!SAVELAYOUT  'data/plate.lay'\n  INCLUDEDATA = YES\n  INCLUDEPREVIEW = NO\n",
    "$!Quit",
  ]);
}

#[test]
fn test_dry_run_writes_macro() {
  let dir = tempfile::tempdir().unwrap();
  let job = AlterDataJob {
    file: PathBuf::from("plate.plt"),
    macro_file: dir.path().join("nested").join("alter.mcr"),
    equations: vec!["{A} = 1".into()],
    ignore_divide_by_zero: true,
    data_type: DataType::Double,
    layout: Some(dir.path().join("plate.lay")),
  };
  let report = run_job(&TecplotConfig::default(), &job, true).unwrap();
  assert!(report.status.is_none());
  assert!(report.ok());
  let written = std::fs::read_to_string(&job.macro_file).unwrap();
  assert!(written.starts_with("#!MC 1410\n"));
  assert!(written.contains("DATATYPE = DOUBLE"));
}

#[cfg(unix)]
#[test]
fn test_run_reports_status_and_missing_outputs() {
  let dir = tempfile::tempdir().unwrap();
  let job = AlterDataJob {
    file: PathBuf::from("plate.plt"),
    macro_file: dir.path().join("alter.mcr"),
    equations: Vec::new(),
    ignore_divide_by_zero: false,
    data_type: DataType::Single,
    layout: Some(dir.path().join("never_written.lay")),
  };
  let config = TecplotConfig {
    exe: Some(PathBuf::from("sh")),
    args: vec!["-c".into(), "exit 3".into()],
    ..Default::default()
  };
  let report = run_job(&config, &job, false).unwrap();
  assert!(!report.status.unwrap().success());
  assert_eq!(report.missing, vec![dir.path().join("never_written.lay")]);
  assert!(!report.ok());
  let status = execute_macro(
    &RunMethod::Executable { exe: "true".into(), args: Vec::new() },
    &job.macro_file
  ).unwrap();
  assert!(status.success());
}

#[cfg(unix)]
#[test]
fn test_run_creates_output_dirs() {
  let dir = data_dir();
  let out = dir.path().join("extracted").join("ace");
  let job = LineExtraction {
    data_dir: dir.path().to_path_buf(),
    output_dir: out.clone(),
    sets: PolylineSets::Shared(vec![
      PolyLine::segment(Point::new(1.0, 0.0, 0.0), Point::new(1.0, 0.0, 1.0), 10),
    ]),
    macro_file: dir.path().join("macros").join("extract.mcr"),
  };
  assert_eq!(job.output_dirs().unwrap(), vec![out.clone()]);
  // stands in for Tecplot, writing where the macro would
  let config = TecplotConfig {
    exe: Some(PathBuf::from("sh")),
    args: vec![
      "-c".into(),
      format!(
        "echo x > '{}' && echo x > '{}'",
        out.join("a_case_line_0.dat").display(),
        out.join("b_case_line_0.dat").display()
      ),
    ],
    ..Default::default()
  };
  let report = run_job(&config, &job, false).unwrap();
  assert!(out.is_dir());
  assert!(report.missing.is_empty());
  assert!(report.ok());
  // pictures get the directory of their image
  let picture = picture_job("case.lay");
  let image = picture.expected_outputs().unwrap().remove(0);
  let expected: Vec<PathBuf> = image.parent()
    .filter(|d| !d.as_os_str().is_empty())
    .map(Path::to_path_buf)
    .into_iter()
    .collect();
  assert_eq!(picture.output_dirs().unwrap(), expected);
}
