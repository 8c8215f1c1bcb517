use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::features::{pipeline::FeatureSettings, row::FeatureSchema, FeaturePipeline};
use crate::model::boosting::BoostedStumps;

const FORMAT_VERSION: u32 = 1;

/// A fitted model with the feature settings and schema it was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub format_version: u32,
    pub settings: FeatureSettings,
    pub schema: FeatureSchema,
    pub model: BoostedStumps,
}

impl ModelBundle {
    pub fn new(settings: FeatureSettings, schema: FeatureSchema, model: BoostedStumps) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            settings,
            schema,
            model,
        }
    }

    /// Rebuild the feature pipeline this model was trained with and check it
    /// still produces the stored columns.
    pub fn pipeline(&self) -> Result<FeaturePipeline> {
        let pipeline = FeaturePipeline::from_settings(&self.settings)?;
        self.schema.ensure_matches(pipeline.schema())?;
        Ok(pipeline)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_cbor::to_writer(writer, self)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let bundle: ModelBundle = serde_cbor::from_reader(reader)?;
        if bundle.format_version != FORMAT_VERSION {
            return Err(PipelineError::schema(format!(
                "model format version {} is not supported (expected {})",
                bundle.format_version, FORMAT_VERSION
            )));
        }
        if bundle.model.n_features != bundle.schema.width() {
            return Err(PipelineError::schema(format!(
                "model has {} inputs but its schema has {} columns",
                bundle.model.n_features,
                bundle.schema.width()
            )));
        }
        Ok(bundle)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        tracing::info!("saved model ({} stumps) to {}", self.model.stumps.len(), path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bundle = Self::read_from(BufReader::new(File::open(path)?))?;
        tracing::info!("loaded model ({} stumps) from {}", bundle.model.stumps.len(), path.display());
        Ok(bundle)
    }
}
