pub mod data_upload;
pub mod modal_sheet;
