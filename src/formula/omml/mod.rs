// OMML (Office Math Markup Language) output
//
// Turns parsed expression trees into the element trees Word stores inside
// `m:oMath`, and serializes them to XML on request.
//
// Reference: https://devblogs.microsoft.com/math-in-office/officemath/

mod element;
mod elements;
mod emitter;
mod writer;

pub use element::{Attributes, Element};
pub use elements::ElementType;
pub use emitter::OmmlEmitter;
pub use writer::{
    MATH_NAMESPACE, WORD_NAMESPACE, WriteOptions, escape_attr, escape_text, to_xml,
};
