//! Spending tag and tag goal routes

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{PatchedTag, Tag, TagGoal};

impl ApiClient {
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.get_json("/user_tags/", "list_tags").await
    }

    pub async fn create_tag(&self, body: &Tag) -> Result<Tag> {
        self.send_json(Method::POST, "/user_tags/", body, "create_tag")
            .await
    }

    pub async fn get_tag(&self, id: i64) -> Result<Tag> {
        self.get_json(&format!("/user_tags/{}/", id), "get_tag").await
    }

    pub async fn update_tag(&self, id: i64, body: &Tag) -> Result<Tag> {
        self.send_json(
            Method::PUT,
            &format!("/user_tags/{}/", id),
            body,
            "update_tag",
        )
        .await
    }

    pub async fn patch_tag(&self, id: i64, body: &PatchedTag) -> Result<Tag> {
        self.send_json(
            Method::PATCH,
            &format!("/user_tags/{}/", id),
            body,
            "patch_tag",
        )
        .await
    }

    /// Delete a tag. Resolves with no payload.
    pub async fn delete_tag(&self, id: i64) -> Result<()> {
        self.delete_void(&format!("/user_tags/{}/", id)).await
    }

    /// Attach a monthly spending goal to a tag (create-only surface)
    pub async fn create_tag_goal(&self, body: &TagGoal) -> Result<TagGoal> {
        self.send_json(Method::POST, "/api/user_goals/", body, "create_tag_goal")
            .await
    }
}
