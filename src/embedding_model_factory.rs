use anyhow::{Context, Result};
use fastembed::{
    read_file_to_bytes, InitOptionsUserDefined, Pooling, TextEmbedding, TokenizerFiles,
    UserDefinedEmbeddingModel,
};
use std::path::Path;
use tracing::info;

/// Load the sentence-embedding model from a local model directory.
///
/// The directory holds the ONNX export under `onnx/model.onnx` next to the
/// tokenizer files of the Hugging Face checkpoint.
pub fn get_model(base_path: &Path) -> Result<TextEmbedding> {
    let read = |relative: &Path| {
        let path = base_path.join(relative);
        read_file_to_bytes(&path).with_context(|| format!("reading {}", path.display()))
    };

    let onnx_bytes = read(Path::new("onnx").join("model.onnx").as_path())?;
    let tokenizer_files = TokenizerFiles {
        tokenizer_file: read(Path::new("tokenizer.json"))?,
        config_file: read(Path::new("config.json"))?,
        special_tokens_map_file: read(Path::new("special_tokens_map.json"))?,
        tokenizer_config_file: read(Path::new("tokenizer_config.json"))?,
    };

    let user_model =
        UserDefinedEmbeddingModel::new(onnx_bytes, tokenizer_files).with_pooling(Pooling::Mean);

    let model =
        TextEmbedding::try_new_from_user_defined(user_model, InitOptionsUserDefined::default())
            .with_context(|| format!("initialising embedding model from {}", base_path.display()))?;
    info!("loaded embedding model from {}", base_path.display());
    Ok(model)
}
