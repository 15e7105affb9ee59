//! Mapping method synthesis.

use stamp_mapper::{MappingSpecification, MemberDescriptor};
use tracing::debug;

use crate::ir::{IRBody, IRInitializer, IRMethod, IRNode, IRParam};
use crate::options::BodyStyle;

/// Name of the parameter every generated method reads from.
pub const SOURCE_PARAMETER: &str = "source";

/// Turns mapping specifications into extension methods:
/// `public static Dest Name(this Src source) => new Dest { A = source.A };`
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodSynthesizer {
    body_style: BodyStyle,
}

impl MethodSynthesizer {
    pub fn new(body_style: BodyStyle) -> Self {
        MethodSynthesizer { body_style }
    }

    pub fn synthesize(&self, spec: &MappingSpecification) -> IRMethod {
        let mut members: Vec<&MemberDescriptor> = spec.members.iter().collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.ty.cmp(&b.ty)));

        let initializers = members
            .iter()
            .map(|member| {
                IRInitializer::new(
                    member.name.as_str(),
                    IRNode::member(IRNode::id(SOURCE_PARAMETER), member.name.as_str()),
                )
            })
            .collect();
        let creation = IRNode::new_object(spec.destination.emitted.as_str(), initializers);

        let body = match self.body_style {
            BodyStyle::Expression => IRBody::Expression(creation),
            BodyStyle::Block => IRBody::Block(vec![IRNode::ret(Some(creation))]),
        };

        debug!(
            method = %spec.method_name,
            members = members.len(),
            "synthesized mapping method"
        );

        IRMethod {
            modifiers: vec!["public".to_string(), "static".to_string()],
            return_type: spec.destination.emitted.clone(),
            name: spec.method_name.clone(),
            parameters: vec![IRParam::this(spec.source.emitted.as_str(), SOURCE_PARAMETER)],
            body,
        }
    }
}
