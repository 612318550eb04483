use std::fmt;
use std::sync::Arc;

use crate::context::Context;

/// A terminal's matcher, resolved once at terminal-registration time rather
/// than sniffed by arity at call time (spec §9, "Recognizer polymorphism").
///
/// `Stateless` recognizers only see the input and a byte offset; `Stateful`
/// ones additionally see the current [`Context`], letting them consult
/// `context.extra`, `context.state` or anything else the driver threads
/// through (spec §8, scenario 6: an `INDENT` terminal reading
/// `context.extra["indent"]`).
///
/// Both forms return the length, in bytes, of the match starting exactly at
/// the given position, or `None` for no match.
#[derive(Clone)]
pub enum Recognizer {
    Stateless(Arc<dyn Fn(&str, usize) -> Option<usize> + Send + Sync>),
    Stateful(Arc<dyn for<'c> Fn(&Context<'c>, &'c str, usize) -> Option<usize> + Send + Sync>),
}

impl Recognizer {
    pub fn stateless(f: impl Fn(&str, usize) -> Option<usize> + Send + Sync + 'static) -> Self {
        Recognizer::Stateless(Arc::new(f))
    }

    pub fn stateful(
        f: impl for<'c> Fn(&Context<'c>, &'c str, usize) -> Option<usize> + Send + Sync + 'static,
    ) -> Self {
        Recognizer::Stateful(Arc::new(f))
    }

    /// A recognizer built from an anchored [`lexan::Pattern`].
    pub fn pattern(pattern: lexan::Pattern) -> Self {
        Recognizer::stateless(move |input, position| {
            pattern.find_at(input, position).map(str::len)
        })
    }

    /// A recognizer that matches a fixed literal string exactly.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Recognizer::stateless(move |input, position| {
            if input[position..].starts_with(text.as_str()) {
                Some(text.len())
            } else {
                None
            }
        })
    }

    pub fn recognize<'c>(
        &self,
        context: &Context<'c>,
        input: &'c str,
        position: usize,
    ) -> Option<usize> {
        match self {
            Recognizer::Stateless(f) => f(input, position),
            Recognizer::Stateful(f) => f(context, input, position),
        }
    }
}

impl fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Recognizer::Stateless(_) => write!(f, "Recognizer::Stateless(..)"),
            Recognizer::Stateful(_) => write!(f, "Recognizer::Stateful(..)"),
        }
    }
}
