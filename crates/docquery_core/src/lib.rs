pub mod domain;
pub mod policy;
pub mod ports;
pub mod upload;

pub use domain::{
    AccessLevel, DocumentMetadata, LoginRequest, PermissionUpdate, PromptFilters,
    PromptHistoryPage, PromptRecord, QueryAnswer, RegisterRequest, SelectedFile, Session,
    Transcript, User, UserPage,
};
pub use ports::{
    ApiError, ApiResult, AuthService, DocumentService, Navigator, PromptHistoryService,
    QueryService, SessionInvalidation, UserAdminService,
};
pub use upload::{BatchStateError, UploadBatch, UploadPhase};
