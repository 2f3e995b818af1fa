use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

/// Mean of one temporal/spatial parameter, before and after treatment.
///
/// Serialized as `[parameter, unit, side, pre, post]`; an undefined mean
/// is `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalRow {
    pub parameter: &'static str,
    pub unit: &'static str,
    pub side: &'static str,
    pub pre: Option<f64>,
    pub post: Option<f64>,
}

impl Serialize for TemporalRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(5)?;
        tuple.serialize_element(self.parameter)?;
        tuple.serialize_element(self.unit)?;
        tuple.serialize_element(self.side)?;
        tuple.serialize_element(&self.pre)?;
        tuple.serialize_element(&self.post)?;
        tuple.end()
    }
}

/// Range of one joint-angle channel, before and after treatment.
///
/// Serialized as `[column, pre_min, pre_max, post_min, post_max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicRow {
    pub column: &'static str,
    pub pre: Option<Range>,
    pub post: Option<Range>,
}

/// Rounded min/max of a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Serialize for KinematicRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(5)?;
        tuple.serialize_element(self.column)?;
        tuple.serialize_element(&self.pre.map(|r| r.min))?;
        tuple.serialize_element(&self.pre.map(|r| r.max))?;
        tuple.serialize_element(&self.post.map(|r| r.min))?;
        tuple.serialize_element(&self.post.map(|r| r.max))?;
        tuple.end()
    }
}

/// Both result tables of one pre/post comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GaitComparison {
    pub temporal: Vec<TemporalRow>,
    pub kinematic: Vec<KinematicRow>,
}
