//! Wire decoding for raw listing/search replies.
//!
//! The backend reports logical failures in-band through a falsy `state` flag, so transport
//! success alone never means the listing succeeded.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{
    DriveEntry, ListFailure, ListingKind, ListingPayload, PathEntry, SortColumn, SortSpec,
};

#[derive(Debug, Clone, Default, Deserialize)]
/// Raw listing or search reply as returned by the drive backend.
pub struct ListReply {
    /// Success flag; anything falsy is a failure.
    #[serde(default, deserialize_with = "de_flag")]
    pub state: Option<bool>,
    /// Error message on failure.
    #[serde(default, alias = "error_msg")]
    pub error: Option<String>,
    /// Directory the reply belongs to.
    #[serde(default, deserialize_with = "de_id")]
    pub cid: Option<String>,
    /// Page rows.
    #[serde(default)]
    pub data: Vec<RawEntry>,
    /// Breadcrumb path (absent on search replies).
    #[serde(default)]
    pub path: Vec<RawPathEntry>,
    /// Total row count.
    #[serde(default)]
    pub count: u64,
    /// Row offset.
    #[serde(default)]
    pub offset: u32,
    /// Page size.
    #[serde(default)]
    pub limit: u32,
    /// Server sort column; unknown tokens decode as `None`.
    #[serde(default, deserialize_with = "de_order")]
    pub order: Option<SortColumn>,
    /// Server sort direction.
    #[serde(default, deserialize_with = "de_flag")]
    pub is_asc: Option<bool>,
    /// Server folder/file mixing flag.
    #[serde(default, deserialize_with = "de_flag")]
    pub fc_mix: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Raw listing row.
pub struct RawEntry {
    /// File id (files only).
    #[serde(default, deserialize_with = "de_id")]
    pub fid: Option<String>,
    /// Folder cid, or the parent cid for files.
    #[serde(default, deserialize_with = "de_id")]
    pub cid: Option<String>,
    /// Parent cid (folders only).
    #[serde(default, deserialize_with = "de_id")]
    pub pid: Option<String>,
    /// Display name.
    #[serde(default, rename = "n")]
    pub name: String,
    /// Size in bytes.
    #[serde(default, rename = "s")]
    pub size: Option<u64>,
    /// Pick code.
    #[serde(default, rename = "pc")]
    pub pick_code: Option<String>,
    /// Star flag.
    #[serde(default, rename = "m", deserialize_with = "de_flag")]
    pub starred: Option<bool>,
    /// Last-modified time.
    #[serde(default, rename = "te", deserialize_with = "de_id")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Raw breadcrumb segment.
pub struct RawPathEntry {
    /// Directory cid.
    #[serde(default, deserialize_with = "de_id")]
    pub cid: Option<String>,
    /// Directory name.
    #[serde(default)]
    pub name: String,
}

impl RawEntry {
    fn into_entry(self) -> DriveEntry {
        // Folders carry no fid; their own id is `cid` and the parent is `pid`.
        match self.fid {
            Some(fid) => DriveEntry {
                id: fid,
                parent_cid: self.cid.unwrap_or_default(),
                name: self.name,
                is_dir: false,
                size: self.size,
                pick_code: self.pick_code,
                starred: self.starred.unwrap_or(false),
                updated_at: self.updated_at,
            },
            None => DriveEntry {
                id: self.cid.unwrap_or_default(),
                parent_cid: self.pid.unwrap_or_default(),
                name: self.name,
                is_dir: true,
                size: None,
                pick_code: self.pick_code,
                starred: self.starred.unwrap_or(false),
                updated_at: self.updated_at,
            },
        }
    }
}

impl ListReply {
    /// Converts the raw reply into a typed payload or failure.
    ///
    /// `kind` is supplied by the caller because search and listing replies share one shape.
    pub fn into_result(self, kind: ListingKind) -> Result<ListingPayload, ListFailure> {
        if self.state != Some(true) {
            return Err(ListFailure {
                message: self
                    .error
                    .filter(|msg| !msg.is_empty())
                    .unwrap_or_else(|| "listing request failed".to_string()),
                order: self.order,
                asc: self.is_asc,
                logical: true,
            });
        }

        let sort = self.order.map(|order| SortSpec {
            order,
            asc: self.is_asc.unwrap_or(true),
            fc_mix: self.fc_mix.unwrap_or(false),
        });

        Ok(ListingPayload {
            kind,
            cid: self.cid.unwrap_or_default(),
            entries: self.data.into_iter().map(RawEntry::into_entry).collect(),
            path: self
                .path
                .into_iter()
                .map(|raw| PathEntry::new(raw.cid.unwrap_or_default(), raw.name))
                .collect(),
            count: self.count,
            offset: self.offset,
            limit: self.limit,
            sort,
        })
    }
}

/// Decodes a raw JSON value into a typed listing result.
///
/// # Errors
///
/// Returns a [`ListFailure`] when the JSON is malformed or the reply reports failure.
pub fn decode_list_reply(raw: Value, kind: ListingKind) -> Result<ListingPayload, ListFailure> {
    let reply: ListReply = serde_json::from_value(raw)
        .map_err(|e| ListFailure::message(format!("malformed listing reply: {e}")))?;
    reply.into_result(kind)
}

fn de_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => Some(flag),
        Some(Value::Number(n)) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
        Some(Value::String(s)) => Some(!s.is_empty() && s != "0" && s != "false"),
        _ => None,
    })
}

fn de_order<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<SortColumn>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(token)) => SortColumn::parse(&token),
        _ => None,
    })
}

fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn successful_reply_decodes_entries_path_and_sort() {
        let raw = json!({
            "state": true,
            "cid": "10",
            "count": 2,
            "offset": 0,
            "limit": 115,
            "order": "user_ptime",
            "is_asc": 0,
            "fc_mix": "1",
            "path": [{"cid": 0, "name": "root"}, {"cid": "10", "name": "Movies"}],
            "data": [
                {"cid": "11", "pid": "10", "n": "Series", "m": 1},
                {"fid": "900", "cid": "10", "n": "clip.mp4", "s": 2048, "pc": "abc", "te": 1700000000}
            ]
        });

        let payload = decode_list_reply(raw, ListingKind::Listing).expect("decode");
        assert_eq!(payload.cid, "10");
        assert_eq!(payload.count, 2);
        assert_eq!(
            payload.path,
            vec![PathEntry::new("0", "root"), PathEntry::new("10", "Movies")]
        );
        assert_eq!(
            payload.sort,
            Some(SortSpec {
                order: SortColumn::UserPtime,
                asc: false,
                fc_mix: true,
            })
        );

        let folder = &payload.entries[0];
        assert!(folder.is_dir);
        assert_eq!(folder.id, "11");
        assert_eq!(folder.parent_cid, "10");
        assert!(folder.starred);

        let file = &payload.entries[1];
        assert!(!file.is_dir);
        assert_eq!(file.id, "900");
        assert_eq!(file.parent_cid, "10");
        assert_eq!(file.size, Some(2048));
        assert_eq!(file.updated_at.as_deref(), Some("1700000000"));
    }

    #[test]
    fn falsy_state_is_a_failure_even_with_data() {
        let raw = json!({
            "state": 0,
            "error": "folder is busy",
            "order": "file_name",
            "is_asc": 1,
            "data": [{"fid": "1", "n": "x"}]
        });
        let failure = decode_list_reply(raw, ListingKind::Listing).expect_err("must fail");
        assert_eq!(failure.message, "folder is busy");
        assert_eq!(failure.order, Some(SortColumn::FileName));
        assert_eq!(failure.asc, Some(true));
        assert!(failure.logical);
    }

    #[test]
    fn failing_reply_with_unknown_order_stays_logical() {
        let raw = json!({
            "state": false,
            "error": "sort not supported",
            "order": "file_otime",
            "is_asc": "0"
        });
        let failure = decode_list_reply(raw, ListingKind::Listing).expect_err("must fail");
        assert!(failure.logical);
        assert_eq!(failure.message, "sort not supported");
        assert_eq!(failure.order, None);
        assert_eq!(failure.asc, Some(false));
    }

    #[test]
    fn unknown_order_on_success_leaves_sort_unset() {
        let raw = json!({"state": true, "cid": "3", "order": "file_otime", "is_asc": 1});
        let payload = decode_list_reply(raw, ListingKind::Listing).expect("decode");
        assert_eq!(payload.sort, None);
        assert_eq!(SortColumn::parse("user_utime"), Some(SortColumn::UserUtime));
    }

    #[test]
    fn missing_state_and_message_use_generic_failure() {
        let failure = decode_list_reply(json!({}), ListingKind::Search).expect_err("must fail");
        assert_eq!(failure, ListFailure::logical("listing request failed"));
    }

    #[test]
    fn malformed_reply_reports_decode_error() {
        let failure =
            decode_list_reply(json!({"state": true, "count": "many"}), ListingKind::Listing)
                .expect_err("must fail");
        assert!(failure.message.starts_with("malformed listing reply"));
        assert!(!failure.logical);
    }
}
