//! Object selectivity: normalized preference per object and the maximum rate

use core::fmt;
use std::collections::BTreeMap;

use crate::error::*;

/// Default maximum firing rate (spikes/s)
pub const DEFAULT_MAX_FIRE_RATE: f64 = 100.0;

/// Object preference table of one neuron
#[derive(Debug, Clone, PartialEq)]
pub struct Selectivity {
    objects: BTreeMap<String, f64>,
    max_fire_rate: f64,
}

impl Selectivity {
    /// Create a selectivity profile; preferences must lie in `[0, 1]`
    pub fn new(objects: BTreeMap<String, f64>, max_fire_rate: f64) -> Result<Self> {
        for (object, &preference) in &objects {
            if !(0.0..=1.0).contains(&preference) {
                return Err(RuntimeError::invalid_parameter(
                    format!("preference[{}]", object),
                    preference.to_string(),
                    "within [0.0, 1.0]",
                ));
            }
        }
        if !(max_fire_rate >= 0.0) || !max_fire_rate.is_finite() {
            return Err(RuntimeError::invalid_parameter(
                "max_fire_rate",
                max_fire_rate.to_string(),
                ">= 0.0 and finite",
            ));
        }

        Ok(Self {
            objects,
            max_fire_rate,
        })
    }

    /// Maximum firing rate (spikes/s)
    pub fn max_fire_rate(&self) -> f64 {
        self.max_fire_rate
    }

    /// Late (default) preference table
    pub fn objects(&self) -> &BTreeMap<String, f64> {
        &self.objects
    }

    /// Preference for an object, 0 for objects the neuron has never seen
    pub fn preference(&self, object: &str) -> f64 {
        self.objects.get(object).copied().unwrap_or(0.0)
    }

    /// Early-phase preference table: each preference doubled and capped at 1
    pub fn early_objects(&self) -> BTreeMap<String, f64> {
        early_preferences(&self.objects)
    }

    /// Objects by descending preference
    pub fn ranked_objects(&self) -> Vec<(&str, f64)> {
        rank(&self.objects)
    }
}

/// Lower early-phase selectivity, derived from the late preference table
pub fn early_preferences(late: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    late.iter()
        .map(|(object, &preference)| (object.clone(), (preference * 2.0).min(1.0)))
        .collect()
}

/// Sort a preference table by descending preference (ties by name)
pub(crate) fn rank(table: &BTreeMap<String, f64>) -> Vec<(&str, f64)> {
    let mut ranked: Vec<(&str, f64)> = table.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

/// Write a ranked preference list, one object per line with aligned names
pub(crate) fn write_ranked(f: &mut fmt::Formatter<'_>, ranked: &[(&str, f64)]) -> fmt::Result {
    let width = ranked.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, preference) in ranked {
        write!(f, "\n\t{:<width$} : {:.4}", name, preference, width = width)?;
    }
    Ok(())
}

impl fmt::Display for Selectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profile            = table")?;
        writeln!(f, "max fire rate      = {:.4}", self.max_fire_rate)?;
        write!(f, "Object Preferences =")?;
        write_ranked(f, &self.ranked_objects())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BTreeMap<String, f64> {
        [("car", 0.4), ("bus", 0.6), ("tram", 0.2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_validation() {
        let mut bad = table();
        bad.insert("truck".into(), 1.5);
        assert!(Selectivity::new(bad, 100.0).is_err());
        assert!(Selectivity::new(table(), -1.0).is_err());
        assert!(Selectivity::new(table(), f64::NAN).is_err());
        assert!(Selectivity::new(BTreeMap::new(), 0.0).is_ok());
    }

    #[test]
    fn test_unknown_object_defaults_to_zero() {
        let s = Selectivity::new(table(), 100.0).unwrap();
        assert_eq!(s.preference("bus"), 0.6);
        assert_eq!(s.preference("monkey"), 0.0);
    }

    #[test]
    fn test_early_preferences_double_and_clamp() {
        let s = Selectivity::new(table(), 100.0).unwrap();
        let early = s.early_objects();
        assert_eq!(early["car"], 0.8);
        assert_eq!(early["bus"], 1.0);
        assert_eq!(early["tram"], 0.4);
    }

    #[test]
    fn test_ranking() {
        let s = Selectivity::new(table(), 100.0).unwrap();
        let names: Vec<&str> = s.ranked_objects().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["bus", "car", "tram"]);
    }

    #[test]
    fn test_display_lists_objects() {
        let s = Selectivity::new(table(), 100.0).unwrap();
        let text = s.to_string();
        assert!(text.contains("max fire rate      = 100.0000"));
        assert!(text.contains("bus  : 0.6000"));
    }
}
