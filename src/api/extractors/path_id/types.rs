/**
 * Responsibility
 *
 * 主な責務
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 置くもの
 *  - CategoryTag, UserTag などのタグ型と PathIdKind 実装
 *  - type CategoryId = PathId<CategoryTag> のような alias
 *
 * 置かないもの
 *  - extractor 実装 (core.rs)
 */
use uuid::Uuid;

use super::core::{PathId, PathIdKind};

/// Tag + alias for a resource keyed by a server-generated UUID.
macro_rules! uuid_keyed {
    ($tag:ident, $alias:ident) => {
        pub enum $tag {}

        impl PathIdKind for $tag {
            type Id = Uuid;
            const PARAM: &'static str = "id";

            fn parse(segment: &str) -> Option<Uuid> {
                Uuid::parse_str(segment).ok()
            }
        }

        pub type $alias = PathId<$tag>;
    };
}

uuid_keyed!(CategoryTag, CategoryId);
uuid_keyed!(ProductTag, ProductId);
uuid_keyed!(SupportTag, SupportId);

// users: keyed by the identity provider's subject id, kept opaque
pub enum UserTag {}

impl PathIdKind for UserTag {
    type Id = String;
    const PARAM: &'static str = "uid";

    fn parse(segment: &str) -> Option<String> {
        Some(segment.to_string())
    }
}

pub type UserUid = PathId<UserTag>;
