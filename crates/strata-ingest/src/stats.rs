use strata_int128::Int128;

/// Per-column-chunk statistics, fed once per successful conversion and
/// handed to the column-chunk writer as storage metadata.
///
/// Integer-like columns (number, boolean, time, timestamp, date) track an
/// `Int128` min/max; real columns track an `f64` min/max; binary/string
/// columns track lexicographic byte min/max plus the longest value seen.
/// One writer per buffer — callers needing concurrency keep a buffer per
/// worker and [`merge`](StatsBuffer::merge) afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatsBuffer {
    pub row_count: u64,
    pub null_count: u64,
    pub min_int: Option<Int128>,
    pub max_int: Option<Int128>,
    pub min_real: Option<f64>,
    pub max_real: Option<f64>,
    pub min_bytes: Option<Vec<u8>>,
    pub max_bytes: Option<Vec<u8>>,
    pub max_bytes_len: usize,
}

impl StatsBuffer {
    pub fn new() -> StatsBuffer {
        StatsBuffer::default()
    }

    pub fn record_null(&mut self) {
        self.row_count += 1;
        self.null_count += 1;
    }

    pub fn record_int(&mut self, v: Int128) {
        self.row_count += 1;
        self.min_int = Some(self.min_int.map_or(v, |m| m.min(v)));
        self.max_int = Some(self.max_int.map_or(v, |m| m.max(v)));
    }

    /// Booleans are tracked on the integer bounds as 0/1.
    pub fn record_bool(&mut self, v: bool) {
        self.record_int(if v { Int128::ONE } else { Int128::ZERO });
    }

    /// `f64::min`/`f64::max` ordering: a NaN never displaces an existing
    /// bound, so NaN can only be reported when every recorded value was NaN.
    pub fn record_real(&mut self, v: f64) {
        self.row_count += 1;
        self.min_real = Some(self.min_real.map_or(v, |m| m.min(v)));
        self.max_real = Some(self.max_real.map_or(v, |m| m.max(v)));
    }

    pub fn record_bytes(&mut self, v: &[u8]) {
        self.row_count += 1;
        self.max_bytes_len = self.max_bytes_len.max(v.len());
        match &self.min_bytes {
            Some(m) if m.as_slice() <= v => {}
            _ => self.min_bytes = Some(v.to_vec()),
        }
        match &self.max_bytes {
            Some(m) if m.as_slice() >= v => {}
            _ => self.max_bytes = Some(v.to_vec()),
        }
    }

    /// Number of rows that carried a value (everything except nulls).
    pub fn value_count(&self) -> u64 {
        self.row_count - self.null_count
    }

    /// Folds another chunk's statistics into this buffer.
    pub fn merge(&mut self, other: &StatsBuffer) {
        self.row_count += other.row_count;
        self.null_count += other.null_count;
        self.min_int = merge_bound(self.min_int, other.min_int, |a, b| a.min(b));
        self.max_int = merge_bound(self.max_int, other.max_int, |a, b| a.max(b));
        self.min_real = merge_bound(self.min_real, other.min_real, f64::min);
        self.max_real = merge_bound(self.max_real, other.max_real, f64::max);
        self.min_bytes = merge_bound(self.min_bytes.take(), other.min_bytes.clone(), |a, b| {
            if a <= b {
                a
            } else {
                b
            }
        });
        self.max_bytes = merge_bound(self.max_bytes.take(), other.max_bytes.clone(), |a, b| {
            if a >= b {
                a
            } else {
                b
            }
        });
        self.max_bytes_len = self.max_bytes_len.max(other.max_bytes_len);
    }
}

fn merge_bound<T>(a: Option<T>, b: Option<T>, pick: impl Fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, None) => a,
        (None, b) => b,
    }
}
