//! Threshold rules that turn a weather sample into Hindi guidance.

use crate::numeric::Numeric;
use serde::{Serialize, Serializer};

/// One guidance sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guidance {
    /// 35 °C and up.
    Heat,
    /// 28 to 35 °C.
    Warm,
    /// 20 to 28 °C.
    Pleasant,
    /// 10 to 20 °C.
    Cool,
    /// Below 10 °C.
    Cold,
    /// Rain chance 70 % and up.
    HeavyRain,
    /// Rain chance 40 to 70 %.
    PossibleRain,
    /// Humidity 80 % and up while 28 °C or warmer.
    Muggy,
}

impl Guidance {
    /// Sentence shown to the user.
    pub fn text(&self) -> &'static str {
        match self {
            Self::Heat => "बहुत तेज़ गर्मी है, दोपहर की धूप में बाहर जाने से बचें और खूब पानी पिएं।",
            Self::Warm => "मौसम गर्म है, हल्के सूती कपड़े पहनें और पानी साथ रखें।",
            Self::Pleasant => "मौसम सुहावना है, बाहर घूमने के लिए अच्छा दिन है।",
            Self::Cool => "हल्की ठंडक है, एक हल्की जैकेट साथ रखें।",
            Self::Cold => "ठंड ज़्यादा है, गर्म कपड़े पहनकर ही बाहर निकलें।",
            Self::HeavyRain => "आज तेज़ बारिश की संभावना है, छाता या रेनकोट ज़रूर साथ रखें।",
            Self::PossibleRain => "बारिश हो सकती है, छाता साथ रखना अच्छा रहेगा।",
            Self::Muggy => "उमस भरा मौसम है, भारी काम से बचें और बीच-बीच में आराम करें।",
        }
    }

    fn for_temperature(celsius: f64) -> Self {
        match celsius {
            t if t >= 35.0 => Self::Heat,
            t if t >= 28.0 => Self::Warm,
            t if t >= 20.0 => Self::Pleasant,
            t if t >= 10.0 => Self::Cool,
            _ => Self::Cold,
        }
    }

    fn for_rain_chance(pct: f64) -> Option<Self> {
        match pct {
            p if p >= 70.0 => Some(Self::HeavyRain),
            p if p >= 40.0 => Some(Self::PossibleRain),
            _ => None,
        }
    }
}

impl Serialize for Guidance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

/// Ordered guidance for one sample. Empty is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Advisory(Vec<Guidance>);

impl Advisory {
    #[must_use]
    pub fn items(&self) -> &[Guidance] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, guidance: Guidance) -> bool {
        self.0.contains(&guidance)
    }

    /// All sentences joined by a single space, in rule order.
    #[must_use]
    pub fn text(&self) -> String {
        self.0
            .iter()
            .map(Guidance::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Derive guidance from temperature, humidity and rain chance.
///
/// Rules run in a fixed order: one temperature band, then at most one rain
/// band, then the humid-heat rule. Unknown inputs simply skip their rules.
#[must_use]
pub fn build_advisory(
    temperature_c: Numeric,
    humidity_pct: Numeric,
    rain_chance_pct: Numeric,
) -> Advisory {
    let mut guidance = Vec::with_capacity(3);

    if let Some(t) = temperature_c.value() {
        guidance.push(Guidance::for_temperature(t));
    }

    if let Some(rain) = rain_chance_pct.value().and_then(Guidance::for_rain_chance) {
        guidance.push(rain);
    }

    if humidity_pct.at_least(80.0) && temperature_c.at_least(28.0) {
        guidance.push(Guidance::Muggy);
    }

    Advisory(guidance)
}
