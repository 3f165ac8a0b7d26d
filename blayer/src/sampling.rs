//! Evenly spaced samples, for overlaying theory on data.

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
  return match n {
    0 => Vec::new(),
    1 => vec![start],
    _ => {
      let last = n - 1;
      let span = stop - start;
      (0..n)
        .map(|i| if i == last {
          stop
        } else {
          start + span * i as f64 / last as f64
        })
        .collect()
    },
  };
}

/// `n` values from `10^start` to `10^stop`, evenly spaced in log scale.
pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
  return linspace(start, stop, n).into_iter().map(|e| 10f64.powf(e)).collect();
}
