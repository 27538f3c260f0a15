pub mod answer_codec;
pub mod media_service;
pub mod scoring_service;
pub mod storage_service;
pub mod test_record_service;
