use super::{NodeRole, TextRule};
use itertools::Itertools;
use std::fmt;

/// Master macro defining every known node type, its serialized type tag and its role.
///
/// Anything not listed here parses as `NodeKind::Unknown`.
macro_rules! define_node_kinds {
    ( $( ($variant:ident, $tag:literal, $role:expr) ),* $(,)? ) => {
        /// A node type the resolver knows how to treat.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $( $variant, )*
            Unknown,
        }

        impl NodeKind {
            /// Every known kind, in declaration order. `Unknown` is not included.
            pub const ALL: &'static [NodeKind] = &[ $( NodeKind::$variant, )* ];

            pub fn from_type_tag(tag: &str) -> Self {
                match tag {
                    $( $tag => NodeKind::$variant, )*
                    _ => NodeKind::Unknown,
                }
            }

            pub fn type_tag(&self) -> Option<&'static str> {
                match self {
                    $( NodeKind::$variant => Some($tag), )*
                    NodeKind::Unknown => None,
                }
            }

            pub fn role(&self) -> NodeRole {
                match self {
                    $( NodeKind::$variant => $role, )*
                    NodeKind::Unknown => NodeRole::Other,
                }
            }
        }
    };
}

define_node_kinds! {
    // Samplers with named positive/negative conditioning inputs
    (KSampler, "KSampler", NodeRole::PosNegSampler),
    (KSamplerAdvanced, "KSamplerAdvanced", NodeRole::PosNegSampler),
    (ClownsharKSamplerBeta, "ClownsharKSampler_Beta", NodeRole::PosNegSampler),

    // Samplers with a single aggregated text input
    (WanVideoSampler, "WanVideoSampler", NodeRole::EmbedsSampler),

    (WanVideoTextEmbedBridge, "WanVideoTextEmbedBridge", NodeRole::Bridge),

    // Encoders
    (ClipTextEncode, "CLIPTextEncode", NodeRole::Encoder(TextRule::Single)),
    (TextEncodeQwenImageEdit, "TextEncodeQwenImageEdit", NodeRole::Encoder(TextRule::Single)),
    (WanVideoTextEncode, "WanVideoTextEncode", NodeRole::Encoder(TextRule::Dual)),

    // Sinks
    (VhsVideoCombine, "VHS_VideoCombine", NodeRole::Output),
    (SaveImage, "SaveImage", NodeRole::Output),
    (WanVideoDecode, "WanVideoDecode", NodeRole::Output),
}

impl NodeKind {
    /// All known kinds playing `role`.
    pub fn with_role(role: NodeRole) -> Vec<NodeKind> {
        Self::ALL
            .iter()
            .copied()
            .filter(|kind| kind.role() == role)
            .collect_vec()
    }

    /// Kinds whose presence downstream marks a sampler as live.
    pub fn outputs() -> Vec<NodeKind> {
        Self::with_role(NodeRole::Output)
    }

    pub fn text_rule(&self) -> Option<TextRule> {
        match self.role() {
            NodeRole::Encoder(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn is_output(&self) -> bool {
        self.role() == NodeRole::Output
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag().unwrap_or("<unknown>"))
    }
}
