pub mod admin_dto;
pub mod test_record_dto;
