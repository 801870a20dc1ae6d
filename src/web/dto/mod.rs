//! Request and response DTOs for the web API.

mod request;
mod response;

pub use request::{DataQuery, ListQuery, RegisterRequest, UploadRequest};
pub use response::{FileResponse, StatsResponse, StatusResponse, TokenResponse, UserResponse};
