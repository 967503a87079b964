use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::core::primitives::decimal_to_f64;
use crate::error::{RaceChartError, RaceResult};

/// Identity of one racing entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub key: String,
    pub label: String,
    /// Host-defined image key shown while this entity's bar is growing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
}

/// Entity-major input row: one value per step, `None` for a missing sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    pub key: String,
    pub label: String,
    pub artwork: Option<String>,
    pub values: Vec<Option<f64>>,
}

impl DatasetRow {
    #[must_use]
    pub fn new(key: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            artwork: None,
            values,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    pub fn from_decimals(key: impl Into<String>, values: &[Option<Decimal>]) -> RaceResult<Self> {
        let key = key.into();
        let values = values
            .iter()
            .map(|value| {
                value
                    .map(|value| decimal_to_f64(value, &format!("value of `{key}`")))
                    .transpose()
            })
            .collect::<RaceResult<Vec<_>>>()?;
        Ok(Self::new(key, values))
    }
}

/// Step-major input column: every declared entity key must appear, even as
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepColumn {
    pub label: String,
    pub values: IndexMap<String, Option<f64>>,
}

impl StepColumn {
    #[must_use]
    pub fn new(label: impl Into<String>, values: IndexMap<String, Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Immutable entity × step table of nullable values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesDataset {
    entities: Vec<Entity>,
    key_index: IndexSet<String>,
    step_labels: Vec<String>,
    // Entity-major: `values[entity][step]`.
    values: Vec<Vec<Option<f64>>>,
}

impl TimeSeriesDataset {
    pub fn from_rows(step_labels: Vec<String>, rows: Vec<DatasetRow>) -> RaceResult<Self> {
        if step_labels.is_empty() {
            return Err(RaceChartError::DataFormat(
                "dataset must contain at least one step".to_owned(),
            ));
        }
        if rows.is_empty() {
            return Err(RaceChartError::DataFormat(
                "dataset must contain at least one entity".to_owned(),
            ));
        }

        let step_count = step_labels.len();
        let mut entities = Vec::with_capacity(rows.len());
        let mut key_index = IndexSet::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            if row.key.is_empty() {
                return Err(RaceChartError::DataFormat(
                    "entity key must not be empty".to_owned(),
                ));
            }
            if row.values.len() != step_count {
                return Err(RaceChartError::DataFormat(format!(
                    "entity `{}` has {} values but dataset has {step_count} steps",
                    row.key,
                    row.values.len()
                )));
            }
            if let Some(step) = row
                .values
                .iter()
                .position(|value| value.is_some_and(|value| !value.is_finite()))
            {
                return Err(RaceChartError::DataFormat(format!(
                    "entity `{}` has a non-finite value at step {step}",
                    row.key
                )));
            }
            if !key_index.insert(row.key.clone()) {
                return Err(RaceChartError::DataFormat(format!(
                    "duplicate entity key `{}`",
                    row.key
                )));
            }
            entities.push(Entity {
                key: row.key,
                label: row.label,
                artwork: row.artwork,
            });
            values.push(row.values);
        }

        Ok(Self {
            entities,
            key_index,
            step_labels,
            values,
        })
    }

    /// Builds a dataset from per-step columns indexed by entity key.
    ///
    /// `keys` fixes the entity order; each column must declare exactly those
    /// keys.
    pub fn from_columns(keys: &[String], columns: Vec<StepColumn>) -> RaceResult<Self> {
        let mut rows: Vec<DatasetRow> = keys
            .iter()
            .map(|key| DatasetRow::new(key.clone(), Vec::with_capacity(columns.len())))
            .collect();
        let mut step_labels = Vec::with_capacity(columns.len());

        for column in columns {
            if let Some(unknown) = column.values.keys().find(|key| !keys.contains(key)) {
                return Err(RaceChartError::DataFormat(format!(
                    "step `{}` declares unknown entity key `{unknown}`",
                    column.label
                )));
            }
            for row in &mut rows {
                let Some(value) = column.values.get(&row.key) else {
                    return Err(RaceChartError::DataFormat(format!(
                        "step `{}` is missing entity key `{}`",
                        column.label, row.key
                    )));
                };
                row.values.push(*value);
            }
            step_labels.push(column.label);
        }

        Self::from_rows(step_labels, rows)
    }

    /// Replaces display labels by key. Unknown keys are rejected.
    pub fn with_labels<I, K, L>(mut self, labels: I) -> RaceResult<Self>
    where
        I: IntoIterator<Item = (K, L)>,
        K: AsRef<str>,
        L: Into<String>,
    {
        for (key, label) in labels {
            let id = self.entity_index(key.as_ref()).ok_or_else(|| {
                RaceChartError::DataFormat(format!("unknown entity key `{}`", key.as_ref()))
            })?;
            self.entities[id.index()].label = label.into();
        }
        Ok(self)
    }

    /// Attaches artwork keys by entity key. Unknown keys are rejected.
    pub fn with_artwork<I, K, A>(mut self, artwork: I) -> RaceResult<Self>
    where
        I: IntoIterator<Item = (K, A)>,
        K: AsRef<str>,
        A: Into<String>,
    {
        for (key, art) in artwork {
            let id = self.entity_index(key.as_ref()).ok_or_else(|| {
                RaceChartError::DataFormat(format!("unknown entity key `{}`", key.as_ref()))
            })?;
            self.entities[id.index()].artwork = Some(art.into());
        }
        Ok(self)
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.step_labels.len()
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    #[must_use]
    pub fn entity_index(&self, key: &str) -> Option<EntityId> {
        self.key_index.get_index_of(key).map(EntityId::new)
    }

    #[must_use]
    pub fn entity_ids(&self) -> impl ExactSizeIterator<Item = EntityId> + use<> {
        (0..self.entities.len()).map(EntityId::new)
    }

    /// Value of `entity` at `step`; `None` for missing samples and out-of-range
    /// lookups.
    #[must_use]
    pub fn value_at(&self, entity: EntityId, step: usize) -> Option<f64> {
        self.values
            .get(entity.index())
            .and_then(|row| row.get(step))
            .copied()
            .flatten()
    }

    #[must_use]
    pub fn value_for_key(&self, key: &str, step: usize) -> Option<f64> {
        self.entity_index(key)
            .and_then(|entity| self.value_at(entity, step))
    }

    #[must_use]
    pub fn step_label(&self, step: usize) -> Option<&str> {
        self.step_labels.get(step).map(String::as_str)
    }

    #[must_use]
    pub fn step_labels(&self) -> &[String] {
        &self.step_labels
    }

    /// Largest non-null value over the whole table.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.values
            .iter()
            .flatten()
            .flatten()
            .copied()
            .reduce(f64::max)
    }
}
