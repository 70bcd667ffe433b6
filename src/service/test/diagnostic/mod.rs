use super::*;
use crate::service::diagnostic::DiagnosticService;

mod check_config;
