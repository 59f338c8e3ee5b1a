//! Column names carried by upstream vessel exports.

pub const VESSEL_NAME: &str = "vessel_name";
pub const IMO: &str = "imo";
pub const FLAG_CODE: &str = "flag_code";
pub const GEAR_TYPE: &str = "gear_type";
pub const VESSEL_TYPE: &str = "vessel_type";
