pub mod test_record;
