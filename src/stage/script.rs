use crate::{
    decor::corner::Corner,
    foundation::core::{Millis, Rgba8},
    foundation::error::{CircuitError, CircuitResult},
    tracker::zone::{PageRegion, Zone},
};

/// Host signal as recorded in a script.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageEvent {
    PointerEnter,
    /// Pointer position in host pixels.
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    Scroll { scroll_y: f64 },
    Resize {
        width: f64,
        height: f64,
        #[serde(default)]
        document_height: Option<f64>,
    },
    CornerHover { corner: Corner, hover: bool },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimedEvent {
    pub at: Millis,
    #[serde(flatten)]
    pub event: StageEvent,
}

/// Page section in absolute document pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZoneSpec {
    pub label: String,
    pub color: Rgba8,
    pub top: f64,
    pub bottom: f64,
}

impl ZoneSpec {
    pub fn to_zone(&self) -> Zone {
        Zone::new(
            self.label.clone(),
            self.color,
            PageRegion::new(self.top, self.bottom),
        )
    }
}

/// Recorded session: page layout plus timestamped host signals.
///
/// ```json
/// { "zones": [{ "label": "Landing", "color": "#00933C", "top": 0, "bottom": 800 }],
///   "events": [{ "at": 0, "type": "pointer_enter" },
///              { "at": 50, "type": "pointer_move", "x": 300, "y": 200 }] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Script {
    pub zones: Vec<ZoneSpec>,
    pub events: Vec<TimedEvent>,
}

impl Script {
    pub fn from_json(s: &str) -> CircuitResult<Self> {
        let script: Self = serde_json::from_str(s)?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> CircuitResult<()> {
        for z in &self.zones {
            if !(z.top.is_finite() && z.bottom.is_finite()) || z.bottom < z.top {
                return Err(CircuitError::validation(format!(
                    "zone '{}' must have finite top <= bottom",
                    z.label
                )));
            }
        }
        if let Some(w) = self.events.windows(2).find(|w| w[1].at < w[0].at) {
            return Err(CircuitError::validation(format!(
                "events must be ordered by time ({} after {})",
                w[1].at.0, w[0].at.0
            )));
        }
        Ok(())
    }

    /// Zones for the tracker; the four default stations when the script names none.
    pub fn zones(&self) -> Vec<Zone> {
        if self.zones.is_empty() {
            return default_zones();
        }
        self.zones.iter().map(ZoneSpec::to_zone).collect()
    }

    /// Time of the last event.
    pub fn end(&self) -> Millis {
        self.events.last().map_or(Millis::ZERO, |e| e.at)
    }
}

/// Landing, Problem, Solution and Details, one 800px section each.
pub fn default_zones() -> Vec<Zone> {
    [
        ("Landing", Rgba8::rgb(0x00, 0x93, 0x3C)),
        ("Problem", Rgba8::rgb(0x00, 0x39, 0xA6)),
        ("Solution", Rgba8::rgb(0xFC, 0xCC, 0x0A)),
        ("Details", Rgba8::rgb(0xEE, 0x35, 0x2E)),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (label, color))| {
        let top = i as f64 * 800.0;
        Zone::new(label, color, PageRegion::new(top, top + 800.0))
    })
    .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/stage/script.rs"]
mod tests;
