use super::*;
use crate::service::statics::StaticService;

mod clear;
