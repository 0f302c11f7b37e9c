//! Opacity fades
//!
//! Frame-driven alternative to [`hide`](crate::hide) and
//! [`show`](crate::show). The caller owns the frame loop and advances the
//! animation with [`OpacityFade::step`]; nothing here schedules itself.

use domkit_dom::{Document, NodeId};

use crate::{Error, FadeOptions, Result};

/// Accumulated step error tolerated at either end
const SETTLE: f64 = 1e-9;

/// Fade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    Out,
    In,
}

/// Progress after one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    Running,
    Finished,
}

/// An in-progress opacity animation on one element
#[derive(Debug, Clone)]
pub struct OpacityFade {
    element: NodeId,
    direction: FadeDirection,
    step: f64,
    opacity: f64,
    finished: bool,
}

/// Start fading an element out from its current inline opacity
///
/// Once opacity reaches 0 the element gets `display: none`.
#[deprecated(note = "use `hide`, which toggles the `hidden` flag")]
pub fn fade_out(doc: &Document, id: NodeId, options: FadeOptions) -> Result<OpacityFade> {
    options.validate()?;
    let opacity = current_opacity(doc, id)?.unwrap_or(1.0);
    Ok(OpacityFade {
        element: id,
        direction: FadeDirection::Out,
        step: options.step,
        opacity,
        finished: false,
    })
}

/// Start fading an element in from transparent
///
/// Clears any inline `display` and sets opacity to 0 right away.
#[deprecated(note = "use `show`, which clears the `hidden` flag")]
pub fn fade_in(doc: &mut Document, id: NodeId, options: FadeOptions) -> Result<OpacityFade> {
    options.validate()?;
    current_opacity(doc, id)?;
    doc.tree.remove_style_property(id, "display")?;
    doc.tree.set_style_property(id, "opacity", "0")?;
    Ok(OpacityFade {
        element: id,
        direction: FadeDirection::In,
        step: options.step,
        opacity: 0.0,
        finished: false,
    })
}

fn current_opacity(doc: &Document, id: NodeId) -> Result<Option<f64>> {
    if !doc.tree.is_element(id) {
        return Err(Error::not_found(format!("element {id}")));
    }
    let style = doc.tree.style(id)?;
    Ok(style
        .get_property("opacity")
        .and_then(|value| value.parse::<f64>().ok())
        .map(|value| value.clamp(0.0, 1.0)))
}

/// Opacity as written to the style attribute, without float noise
fn format_opacity(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

impl OpacityFade {
    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Opacity written by the last frame
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one frame
    ///
    /// Calling this after the fade finished is a no-op.
    pub fn step(&mut self, doc: &mut Document) -> Result<FadeState> {
        if self.finished {
            return Ok(FadeState::Finished);
        }
        if !doc.tree.is_element(self.element) {
            return Err(Error::not_found(format!("element {}", self.element)));
        }

        match self.direction {
            FadeDirection::Out => {
                self.opacity = (self.opacity - self.step).max(0.0);
                if self.opacity <= SETTLE {
                    self.opacity = 0.0;
                    self.finished = true;
                }
            }
            FadeDirection::In => {
                self.opacity = (self.opacity + self.step).min(1.0);
                if self.opacity >= 1.0 - SETTLE {
                    self.opacity = 1.0;
                    self.finished = true;
                }
            }
        }

        doc.tree
            .set_style_property(self.element, "opacity", &format_opacity(self.opacity))?;
        if self.finished && self.direction == FadeDirection::Out {
            doc.tree.set_style_property(self.element, "display", "none")?;
        }

        if self.finished {
            tracing::trace!("fade {:?} finished on {}", self.direction, self.element);
            Ok(FadeState::Finished)
        } else {
            Ok(FadeState::Running)
        }
    }

    /// Run every remaining frame, returning how many were taken
    pub fn run_to_end(&mut self, doc: &mut Document) -> Result<usize> {
        if self.finished {
            return Ok(0);
        }
        let mut frames = 0;
        while self.step(doc)? == FadeState::Running {
            frames += 1;
        }
        Ok(frames + 1)
    }
}
