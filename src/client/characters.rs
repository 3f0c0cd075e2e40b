//! Character management (`/character`).
//!
//! The backend exposes create/update/delete as GET endpoints taking the
//! character fields as query parameters.

use super::core::VoiceChatClient;
use crate::types::{Character, Page};
use crate::{Error, ErrorContext, Result};
use serde_json::Value;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

impl VoiceChatClient {
    /// One page of characters. Pages are 1-based.
    pub async fn get_character_page(&self, current_page: u32, page_size: u32) -> Result<Page<Character>> {
        if current_page == 0 || page_size == 0 {
            return Err(Error::validation_with_context(
                "page number and page size must be at least 1",
                ErrorContext::new()
                    .with_details(format!("currentPage={current_page}, pageSize={page_size}"))
                    .with_source("get_character_page"),
            ));
        }
        self.get_typed(
            "get_character_page",
            &["character", "getPage"],
            &[("currentPage", current_page), ("pageSize", page_size)],
        )
        .await
    }

    /// First page with the default page size.
    pub async fn get_first_character_page(&self) -> Result<Page<Character>> {
        self.get_character_page(DEFAULT_PAGE, DEFAULT_PAGE_SIZE).await
    }

    pub async fn create_character(&self, character: &Character) -> Result<Value> {
        self.get_data("create_character", &["character", "create"], character)
            .await
    }

    /// Update an existing character; `character.id` is required.
    pub async fn update_character(&self, character: &Character) -> Result<Value> {
        if character.id.is_none() {
            return Err(Error::validation_with_context(
                "character id is required for update",
                ErrorContext::new().with_field_path("character.id"),
            ));
        }
        self.get_data("update_character", &["character", "update"], character)
            .await
    }

    pub async fn delete_character(&self, id: i64) -> Result<Value> {
        self.get_data("delete_character", &["character", "delete"], &[("id", id)])
            .await
    }
}
