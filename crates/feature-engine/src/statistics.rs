//! Time-domain Statistics

/// Time-domain descriptors of a signal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticalFeatures {
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Root-mean-square amplitude
    pub rms: f64,
    /// Largest absolute amplitude
    pub peak: f64,
    /// Sign changes between consecutive samples
    pub zero_crossings: usize,
    /// Zero crossings per sample interval
    pub zero_crossing_rate: f64,
}

impl StatisticalFeatures {
    /// Compute statistical features from a slice of values.
    ///
    /// Samples `>= 0.0` count as non-negative; a zero crossing is any change
    /// of that classification between neighbours. Moments are accumulated
    /// over samples scaled by `1 / peak` so large finite inputs do not
    /// overflow.
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;

        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut peak: f64 = 0.0;
        let mut zero_crossings = 0;

        for (i, &v) in values.iter().enumerate() {
            min = min.min(v);
            max = max.max(v);
            peak = peak.max(v.abs());

            if i > 0 && (values[i - 1] >= 0.0) != (v >= 0.0) {
                zero_crossings += 1;
            }
        }

        let zero_crossing_rate = if values.len() >= 2 {
            zero_crossings as f64 / (values.len() - 1) as f64
        } else {
            0.0
        };

        if peak == 0.0 {
            return Self {
                min,
                max,
                zero_crossings,
                zero_crossing_rate,
                ..Self::default()
            };
        }

        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for &v in values {
            let s = v / peak;
            sum += s;
            sum_sq += s * s;
        }

        let scaled_mean = sum / n;
        let scaled_variance = values
            .iter()
            .map(|&v| {
                let d = v / peak - scaled_mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Self {
            mean: scaled_mean * peak,
            std_dev: scaled_variance.sqrt() * peak,
            min,
            max,
            rms: (sum_sq / n).sqrt() * peak,
            peak,
            zero_crossings,
            zero_crossing_rate,
        }
    }
}
