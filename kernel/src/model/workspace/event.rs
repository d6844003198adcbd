use derive_new::new;

use crate::model::id::UserId;

#[derive(new)]
pub struct CreateWorkspace {
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub created_by: UserId,
}
