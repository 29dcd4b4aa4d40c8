//! Declared metric types and the values producers return.

use serde::Serialize;

use crate::dataset::TabularDataset;
use crate::schema::RowSchema;

/// Declared value type of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// 32-bit float.
    Float,
    /// 32-bit signed integer.
    Int,
    /// Array of 64-bit signed integers.
    LongArray,
    /// Table with a fixed row schema.
    Table(&'static RowSchema),
}

impl MetricType {
    /// Short type label for introspection.
    pub fn label(&self) -> &'static str {
        match self {
            MetricType::Float => "float",
            MetricType::Int => "int",
            MetricType::LongArray => "long[]",
            MetricType::Table(schema) => schema.name,
        }
    }
}

/// Value returned by a metric producer. Serialized untagged.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Float(f32),
    Int(i32),
    LongArray(Vec<i64>),
    Table(TabularDataset),
}

impl MetricValue {
    /// Whether this value conforms to `ty` (tables must carry the same schema).
    pub fn conforms_to(&self, ty: &MetricType) -> bool {
        match (self, ty) {
            (MetricValue::Float(_), MetricType::Float)
            | (MetricValue::Int(_), MetricType::Int)
            | (MetricValue::LongArray(_), MetricType::LongArray) => true,
            (MetricValue::Table(t), MetricType::Table(schema)) => t.schema() == *schema,
            _ => false,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            MetricValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            MetricValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            MetricValue::LongArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TabularDataset> {
        match self {
            MetricValue::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::Float(v)
    }
}

impl From<i32> for MetricValue {
    fn from(v: i32) -> Self {
        MetricValue::Int(v)
    }
}

impl From<TabularDataset> for MetricValue {
    fn from(v: TabularDataset) -> Self {
        MetricValue::Table(v)
    }
}
