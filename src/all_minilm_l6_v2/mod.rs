pub const DEFAULT_MODEL_DIR: &str = "all-MiniLM-L6-v2";
pub const VECTOR_SIZE: u64 = 384; // all-MiniLM-L6-v2 embedding Size: 384 dimensions
