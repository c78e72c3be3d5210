pub mod json_api;

pub use json_api::{
    narrate_json, score_batch_json, score_innings_json, InningsPayload, NarrateRequest,
    ScoreBatchRequest, ScoreRequest,
};
