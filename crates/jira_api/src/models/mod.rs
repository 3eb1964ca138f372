mod event;
mod issue;
mod user;

pub use event::{MetaValue, ResultEvent};
pub use issue::{AccountRef, CreatedIssue, IssueCreateRequest, IssueFields, NamedRef, ProjectRef};
pub use user::UserProfile;
