use serde::Serialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use super::{
    entities::{GeneratorSettings, InvalidSettings, MeasurementSeed, PricingRecord},
    evaluation::{summarize, PricingSummary},
    generator::generate_records,
    records::{sort_records, RecordFilter, RecordSort},
};

/// One full regeneration of the pricing grid.
#[derive(Clone, Debug, Serialize)]
pub struct RecordBatch {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub records: Vec<PricingRecord>,
}

impl RecordBatch {
    pub fn generated_at_label(&self) -> String {
        self.generated_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.generated_at.unix_timestamp().to_string())
    }
}

/// State behind the pricing screen. Records are never edited; a refresh
/// replaces the whole batch.
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub settings: GeneratorSettings,
    pub measurements: Vec<MeasurementSeed>,
    batch: Option<RecordBatch>,
}

impl Dashboard {
    pub fn new(settings: GeneratorSettings, measurements: &[MeasurementSeed]) -> Self {
        Self {
            settings,
            measurements: measurements.to_vec(),
            batch: None,
        }
    }

    /// Regenerates the grid. Invalid settings leave the current batch untouched.
    pub fn refresh(&mut self) -> Result<&RecordBatch, InvalidSettings> {
        let records = generate_records(&self.measurements, &self.settings)?;
        let batch = RecordBatch {
            id: Uuid::new_v4(),
            generated_at: OffsetDateTime::now_utc(),
            records,
        };
        info!(batch = %batch.id, records = batch.records.len(), "dashboard refreshed");
        Ok(self.batch.insert(batch))
    }

    pub fn batch(&self) -> Option<&RecordBatch> {
        self.batch.as_ref()
    }

    /// Records of the current batch matching `filter`, in the requested order.
    pub fn view(
        &self,
        filter: &RecordFilter,
        sort: RecordSort,
        descending: bool,
    ) -> Vec<&PricingRecord> {
        let Some(batch) = self.batch.as_ref() else {
            return Vec::new();
        };
        let mut records = filter.apply(&batch.records);
        sort_records(&mut records, sort, descending);
        records
    }

    pub fn summary(&self, filter: &RecordFilter) -> PricingSummary {
        match self.batch.as_ref() {
            Some(batch) => summarize(filter.apply(&batch.records)),
            None => PricingSummary::default(),
        }
    }
}
