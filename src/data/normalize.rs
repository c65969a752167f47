/// Min-max rescale to `[0, 1]`.
///
/// Missing entries stay missing. A constant column maps every defined entry
/// to `0.0`; an all-missing column comes back all-missing.
pub fn min_max_normalize(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let (min, max) = values
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if min > max {
        return vec![None; values.len()];
    }

    let range = max - min;
    values
        .iter()
        .map(|v| {
            v.map(|v| {
                if range > 0.0 {
                    ((v - min) / range).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            })
        })
        .collect()
}

/// The display column: normalized when asked, the raw values otherwise.
pub fn display_values(values: &[Option<f64>], normalize: bool) -> Vec<Option<f64>> {
    if normalize {
        min_max_normalize(values)
    } else {
        values.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_zero_and_one() {
        assert_eq!(min_max_normalize(&[Some(10.0), Some(1000.0)]), vec![Some(0.0), Some(1.0)]);

        let out = min_max_normalize(&[Some(5.0), Some(-5.0), None, Some(0.0)]);
        assert_eq!(out, vec![Some(1.0), Some(0.0), None, Some(0.5)]);
    }

    #[test]
    fn constant_column_maps_to_zero() {
        assert_eq!(
            min_max_normalize(&[Some(3.0), None, Some(3.0)]),
            vec![Some(0.0), None, Some(0.0)]
        );
    }

    #[test]
    fn all_missing_stays_missing() {
        assert_eq!(min_max_normalize(&[None, None]), vec![None, None]);
        assert!(min_max_normalize(&[]).is_empty());
    }

    #[test]
    fn raw_values_pass_through_without_normalization() {
        let values = [Some(10.0), None, Some(1000.0)];
        assert_eq!(display_values(&values, false), values.to_vec());
        assert_eq!(display_values(&values, true), vec![Some(0.0), None, Some(1.0)]);
    }
}
