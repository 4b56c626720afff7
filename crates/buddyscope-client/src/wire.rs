//! Wire (JSON) request and response bodies.
//!
//! Shapes are fixed by the allocator service's HTTP contract. The
//! recursive tree body uses optional child pointers; decoding converts
//! it into the tagged [`BlockNode`] and reports any state the tagged
//! model cannot represent — a single child, or occupancy that
//! disagrees with the free flag — as [`ClientError::Malformed`].

use crate::api::MutationAck;
use crate::error::ClientError;
use buddyscope_core::{BlockNode, SizeUnit};
use serde::{Deserialize, Serialize};

/// Body of `POST /init`.
#[derive(Clone, Debug, Serialize)]
pub struct InitRequest {
    /// Requested total memory size.
    pub total_size: u64,
    /// Unit of `total_size`.
    pub unit: SizeUnit,
}

/// Body of `POST /add_process`.
#[derive(Clone, Debug, Serialize)]
pub struct AddProcessRequest {
    /// Process identifier.
    pub process_id: String,
    /// Requested size.
    pub process_size: u64,
    /// Unit of `process_size`.
    pub unit: SizeUnit,
}

/// Body of `POST /remove_process`.
#[derive(Clone, Debug, Serialize)]
pub struct RemoveProcessRequest {
    /// Process identifier.
    pub process_id: String,
}

/// A mutation response body: `{"status": ..., "detail"?: ...}`.
#[derive(Clone, Debug, Deserialize)]
pub struct StatusBody {
    /// The service's status token.
    pub status: String,
    /// Optional explanation.
    #[serde(default)]
    pub detail: Option<String>,
}

impl From<StatusBody> for MutationAck {
    fn from(body: StatusBody) -> Self {
        MutationAck {
            status: body.status,
            detail: body.detail,
        }
    }
}

/// A non-2xx error body: `{"detail": ...}`.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    /// The service-provided reason string.
    pub detail: String,
}

/// One node of the `GET /tree` response.
#[derive(Clone, Debug, Deserialize)]
pub struct WireNode {
    /// Block size in KB.
    pub size: u64,
    /// Server-formatted size label.
    #[serde(default)]
    pub size_str: Option<String>,
    /// Whether the block holds no process.
    pub is_free: bool,
    /// Occupying process.
    #[serde(default)]
    pub process: Option<String>,
    /// Lower buddy half.
    #[serde(default)]
    pub left: Option<Box<WireNode>>,
    /// Upper buddy half.
    #[serde(default)]
    pub right: Option<Box<WireNode>>,
}

impl WireNode {
    /// Decode into the tagged snapshot model, validating the tree
    /// invariants the wire shape cannot express.
    pub fn into_block(self) -> Result<BlockNode, ClientError> {
        if self.is_free != self.process.is_none() {
            return Err(ClientError::Malformed {
                reason: format!(
                    "node of size {} KB has is_free={} but process={:?}",
                    self.size, self.is_free, self.process
                ),
            });
        }
        match (self.left, self.right) {
            (None, None) => Ok(BlockNode::Leaf {
                size_kb: self.size,
                size_label: self.size_str,
                occupant: self.process,
            }),
            (Some(left), Some(right)) => {
                if self.process.is_some() {
                    return Err(ClientError::Malformed {
                        reason: format!("split node of size {} KB carries an occupant", self.size),
                    });
                }
                Ok(BlockNode::Split {
                    size_kb: self.size,
                    size_label: self.size_str,
                    left: Box::new(left.into_block()?),
                    right: Box::new(right.into_block()?),
                })
            }
            _ => Err(ClientError::Malformed {
                reason: format!("node of size {} KB has exactly one child", self.size),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<BlockNode, ClientError> {
        serde_json::from_str::<WireNode>(json)
            .map_err(|e| ClientError::Malformed {
                reason: e.to_string(),
            })
            .and_then(WireNode::into_block)
    }

    #[test]
    fn requests_serialize_to_the_service_shapes() {
        let init = serde_json::to_value(InitRequest {
            total_size: 8,
            unit: SizeUnit::Mb,
        })
        .unwrap();
        assert_eq!(init, serde_json::json!({"total_size": 8, "unit": "MB"}));

        let add = serde_json::to_value(AddProcessRequest {
            process_id: "P1".to_owned(),
            process_size: 512,
            unit: SizeUnit::Kb,
        })
        .unwrap();
        assert_eq!(
            add,
            serde_json::json!({"process_id": "P1", "process_size": 512, "unit": "KB"})
        );

        let remove = serde_json::to_value(RemoveProcessRequest {
            process_id: "P1".to_owned(),
        })
        .unwrap();
        assert_eq!(remove, serde_json::json!({"process_id": "P1"}));
    }

    #[test]
    fn decodes_a_free_root_leaf() {
        let tree = decode(
            r#"{"size": 8192, "size_str": "8 MB", "is_free": true,
                "process": null, "left": null, "right": null}"#,
        )
        .unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.size_kb(), 8192);
        assert_eq!(tree.size_label(), Some("8 MB"));
        assert!(tree.is_free());
    }

    #[test]
    fn decodes_a_split_with_an_occupied_leaf() {
        let tree = decode(
            r#"{"size": 1024, "is_free": true, "process": null,
                "left": {"size": 512, "is_free": false, "process": "P1",
                         "left": null, "right": null},
                "right": {"size": 512, "is_free": true, "process": null,
                          "left": null, "right": null}}"#,
        )
        .unwrap();
        let (left, right) = tree.children().unwrap();
        assert_eq!(left.occupant(), Some("P1"));
        assert!(right.is_free());
        assert_eq!(tree.used_kb(), 512);
    }

    #[test]
    fn missing_optional_fields_default() {
        let tree = decode(r#"{"size": 64, "is_free": true}"#).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.size_label(), None);
    }

    #[test]
    fn single_child_is_malformed() {
        let err = decode(
            r#"{"size": 1024, "is_free": true, "process": null,
                "left": {"size": 512, "is_free": true, "process": null,
                         "left": null, "right": null},
                "right": null}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Malformed { .. }));
        assert!(err.detail().contains("exactly one child"));
    }

    #[test]
    fn free_flag_must_agree_with_occupancy() {
        let occupied_but_free = decode(
            r#"{"size": 512, "is_free": true, "process": "P1",
                "left": null, "right": null}"#,
        );
        assert!(matches!(
            occupied_but_free,
            Err(ClientError::Malformed { .. })
        ));

        let free_but_not_marked = decode(
            r#"{"size": 512, "is_free": false, "process": null,
                "left": null, "right": null}"#,
        );
        assert!(matches!(
            free_but_not_marked,
            Err(ClientError::Malformed { .. })
        ));
    }

    #[test]
    fn occupied_split_is_malformed() {
        let err = decode(
            r#"{"size": 1024, "is_free": false, "process": "P1",
                "left": {"size": 512, "is_free": true, "process": null,
                         "left": null, "right": null},
                "right": {"size": 512, "is_free": true, "process": null,
                          "left": null, "right": null}}"#,
        )
        .unwrap_err();
        assert!(err.detail().contains("occupant"));
    }

    #[test]
    fn status_body_becomes_an_ack() {
        let body: StatusBody =
            serde_json::from_str(r#"{"status": "allocated"}"#).unwrap();
        let ack = MutationAck::from(body);
        assert_eq!(ack.status, "allocated");
        assert_eq!(ack.detail, None);
    }
}
