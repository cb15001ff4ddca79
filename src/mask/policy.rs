// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Policy tree: the node sum type and the handler capability

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::config::ConfigCodec;
use super::error::Result;
use super::group::GroupPolicy;
use super::item::ItemPolicy;
use super::size_select::SizeSelectPolicy;
use super::splitter::{separable_builder, SeparableAttrs};

/// Anything that can mask a string
///
/// Every policy node implements this; hosts can also implement it (or pass a
/// closure) and attach it to a tree through [`MaskPolicy::custom`].
pub trait MaskHandler: Send + Sync {
    fn handle(&self, src: &str) -> String;
}

impl<F> MaskHandler for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn handle(&self, src: &str) -> String {
        self(src)
    }
}

/// Split, mask, rejoin
///
/// Without a separator the whole string goes to `mask_whole`. With one, the
/// tokens go to `mask_tokens` and the result is joined with the output
/// delimiter.
pub(crate) trait SeparableHandler {
    fn attrs(&self) -> &SeparableAttrs;

    fn mask_whole<'a>(&'a self, src: &'a str) -> Cow<'a, str>;

    fn mask_tokens<'a>(&'a self, src: &'a str, tokens: Vec<&'a str>) -> Vec<Cow<'a, str>>;

    fn handle_separated(&self, src: &str) -> String {
        match self.attrs().tokenize(src) {
            None => self.mask_whole(src).into_owned(),
            Some(tokens) => self
                .mask_tokens(src, tokens)
                .join(self.attrs().delimiter()),
        }
    }
}

/// Identity node
#[derive(Debug, Clone, Default)]
pub struct IgnorePolicy {
    separable: SeparableAttrs,
}

impl IgnorePolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

separable_builder!(IgnorePolicy);

impl SeparableHandler for IgnorePolicy {
    fn attrs(&self) -> &SeparableAttrs {
        &self.separable
    }

    fn mask_whole<'a>(&'a self, src: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(src)
    }

    fn mask_tokens<'a>(&'a self, _src: &'a str, tokens: Vec<&'a str>) -> Vec<Cow<'a, str>> {
        tokens.into_iter().map(Cow::Borrowed).collect()
    }
}

/// Host-provided handler attached to a policy tree
///
/// Custom nodes have no config tag, so a tree containing one cannot be
/// encoded.
#[derive(Clone)]
pub struct CustomPolicy {
    name: String,
    handler: Arc<dyn MaskHandler>,
}

impl CustomPolicy {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPolicy")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A node of the policy tree
///
/// # Example
/// ```
/// use mask_rust::mask::{factory, GroupPolicy, MaskHandler, MaskPolicy};
///
/// let email: MaskPolicy = GroupPolicy::new("@")
///     .add_handlers([factory::reserve_left(1)])
///     .into();
/// assert_eq!(email.handle("abcdef@sina.com"), "a*****@sina.com");
///
/// let config = email.to_config().unwrap();
/// let restored = MaskPolicy::from_config(&config).unwrap();
/// assert_eq!(restored.handle("abcdef@sina.com"), "a*****@sina.com");
/// ```
#[derive(Debug, Clone)]
pub enum MaskPolicy {
    Ignore(IgnorePolicy),
    Item(ItemPolicy),
    Group(GroupPolicy),
    SizeSelect(SizeSelectPolicy),
    Custom(CustomPolicy),
}

impl MaskPolicy {
    pub fn ignore() -> Self {
        MaskPolicy::Ignore(IgnorePolicy::new())
    }

    /// Wrap a host handler as a policy node
    pub fn custom(name: impl Into<String>, handler: impl MaskHandler + 'static) -> Self {
        MaskPolicy::Custom(CustomPolicy {
            name: name.into(),
            handler: Arc::new(handler),
        })
    }

    /// Separator attributes, `None` for custom nodes
    pub fn separable(&self) -> Option<&SeparableAttrs> {
        match self {
            MaskPolicy::Ignore(policy) => Some(policy.separable()),
            MaskPolicy::Item(policy) => Some(policy.separable()),
            MaskPolicy::Group(policy) => Some(policy.separable()),
            MaskPolicy::SizeSelect(policy) => Some(policy.separable()),
            MaskPolicy::Custom(_) => None,
        }
    }

    /// Encode this subtree with the process-wide codec
    pub fn to_config(&self) -> Result<String> {
        ConfigCodec::global().encode(self)
    }

    /// Decode a subtree with the process-wide codec
    pub fn from_config(json: &str) -> Result<Self> {
        ConfigCodec::global().decode(json)
    }
}

impl MaskHandler for MaskPolicy {
    fn handle(&self, src: &str) -> String {
        match self {
            MaskPolicy::Ignore(policy) => policy.handle(src),
            MaskPolicy::Item(policy) => policy.handle(src),
            MaskPolicy::Group(policy) => policy.handle(src),
            MaskPolicy::SizeSelect(policy) => policy.handle(src),
            MaskPolicy::Custom(policy) => policy.handler.handle(src),
        }
    }
}

macro_rules! impl_policy_node {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl MaskHandler for $ty {
                fn handle(&self, src: &str) -> String {
                    self.handle_separated(src)
                }
            }

            impl From<$ty> for MaskPolicy {
                fn from(policy: $ty) -> Self {
                    MaskPolicy::$variant(policy)
                }
            }
        )+
    };
}

impl_policy_node!(
    Ignore(IgnorePolicy),
    Item(ItemPolicy),
    Group(GroupPolicy),
    SizeSelect(SizeSelectPolicy),
);

impl From<CustomPolicy> for MaskPolicy {
    fn from(policy: CustomPolicy) -> Self {
        MaskPolicy::Custom(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_is_identity() {
        let policy = MaskPolicy::ignore();
        assert_eq!(policy.handle("abc"), "abc");
        assert_eq!(policy.handle(""), "");
    }

    #[test]
    fn test_ignore_rejoins_with_output_delimiter() {
        let policy: MaskPolicy = IgnorePolicy::new()
            .with_separator(",")
            .with_output_delimiter(";")
            .into();
        assert_eq!(policy.handle("a,b,c"), "a;b;c");
    }

    #[test]
    fn test_custom_closure() {
        let policy = MaskPolicy::custom("upper", |src: &str| src.to_uppercase());
        assert_eq!(policy.handle("abc"), "ABC");
        assert!(policy.separable().is_none());
        assert!(format!("{:?}", policy).contains("upper"));
    }

    #[test]
    fn test_policy_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MaskPolicy>();
    }
}
