use serde::Serialize;

use crate::factors::score;
use crate::profile::FinancialProfile;

/// Rating handed back to the caller, derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskBand {
    Excellent,
    Good,
    Average,
    Fair,
    Poor,
}

impl RiskBand {
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Average,
        Self::Fair,
        Self::Poor,
    ];

    /// Half-open bands: a score equal to a lower bound belongs to that band.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=19 => Self::Excellent,
            20..=34 => Self::Good,
            35..=49 => Self::Average,
            50..=69 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn lower_bound(self) -> u8 {
        match self {
            Self::Excellent => 0,
            Self::Good => 20,
            Self::Average => 35,
            Self::Fair => 50,
            Self::Poor => 70,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    pub fn level(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Average => "AVERAGE",
            Self::Fair => "FAIR",
            Self::Poor => "POOR",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#27ae60",
            Self::Good => "#2ecc71",
            Self::Average => "#f39c12",
            Self::Fair => "#e67e22",
            Self::Poor => "#e74c3c",
        }
    }

    pub fn description_hindi(self) -> &'static str {
        match self {
            Self::Excellent => "आपका क्रेडिट प्रोफाइल उत्कृष्ट है। आप सभी बैंकों से सर्वोत्तम दरों पर ऋण प्राप्त कर सकते हैं।",
            Self::Good => "आपका क्रेडिट प्रोफाइल अच्छा है। आप आसानी से ऋण अनुमोदन प्राप्त कर सकते हैं।",
            Self::Average => "आपका क्रेडिट प्रोफाइल औसत है। आपको उच्च ब्याज दर पर ऋण मिल सकता है।",
            Self::Fair => "आपका क्रेडिट प्रोफाइल कमजोर है। आपको अधिक ब्याज दर और सख्त शर्तें मिल सकती हैं।",
            Self::Poor => "आपका क्रेडिट प्रोफाइल खराब है। आपको ऋण मिलना मुश्किल हो सकता है। अपने क्रेडिट प्रोफाइल में सुधार करें।",
        }
    }

    pub fn description_english(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Your credit profile is excellent. You can get loans from all banks at the best rates."
            }
            Self::Good => "Your credit profile is good. You can easily get loan approval.",
            Self::Average => {
                "Your credit profile is average. You may get loans at higher interest rates."
            }
            Self::Fair => {
                "Your credit profile is weak. You may get higher rates and stricter conditions."
            }
            Self::Poor => {
                "Your credit profile is poor. You may face difficulty getting loans. Improve your profile."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub rating: RiskBand,
    pub risk_level: &'static str,
    pub risk_color: &'static str,
    pub description_hindi: &'static str,
    pub description_english: &'static str,
}

pub fn classify(score: u8) -> RiskAssessment {
    let band = RiskBand::from_score(score);
    RiskAssessment {
        risk_score: score,
        rating: band,
        risk_level: band.level(),
        risk_color: band.color(),
        description_hindi: band.description_hindi(),
        description_english: band.description_english(),
    }
}

pub fn assess(profile: &FinancialProfile) -> RiskAssessment {
    classify(score(profile))
}
