//! Award categories
//!
//! Every award category ever given has a fixed numeric code. Codes are never
//! changed or reused; new categories are appended.

use std::fmt;

/// Award category, identified by its upstream numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum AwardType {
    Chairmans = 0,
    Winner = 1,
    Finalist = 2,

    WoodieFlowers = 3,
    DeansList = 4,
    Volunteer = 5,
    Founders = 6,
    BartKamenMemorial = 7,
    MakeItLoud = 8,

    EngineeringInspiration = 9,
    RookieAllStar = 10,
    GraciousProfessionalism = 11,
    Coopertition = 12,
    Judges = 13,
    HighestRookieSeed = 14,
    RookieInspiration = 15,
    IndustrialDesign = 16,
    Quality = 17,
    Safety = 18,
    Sportsmanship = 19,
    Creativity = 20,
    EngineeringExcellence = 21,
    Entrepreneurship = 22,
    ExcellenceInDesign = 23,
    ExcellenceInDesignCad = 24,
    ExcellenceInDesignAnimation = 25,
    DrivingTomorrowsTechnology = 26,
    Imagery = 27,
    MediaAndTechnology = 28,
    InnovationInControl = 29,
    Spirit = 30,
    Website = 31,
    Visualization = 32,
    AutodeskInventor = 33,
    FutureInnovator = 34,
    RecognitionOfExtraordinaryService = 35,
    OutstandingCart = 36,
    WsuAimHigher = 37,
    LeadershipInControl = 38,
    Num1Seed = 39,
    IncrediblePlay = 40,
    PeoplesChoiceAnimation = 41,
    VisualizationRisingStar = 42,
    BestOffensiveRound = 43,
    BestPlayOfTheDay = 44,
    FeatherweightInTheFinals = 45,
    MostPhotogenic = 46,
    OutstandingDefense = 47,
    PowerToSimplify = 48,
    AgainstAllOdds = 49,
    RisingStar = 50,
    ChairmansHonorableMention = 51,
    ContentCommunicationHonorableMention = 52,
    TechnicalExecutionHonorableMention = 53,
    Realization = 54,
    RealizationHonorableMention = 55,
    DesignYourFuture = 56,
    DesignYourFutureHonorableMention = 57,
    SpecialRecognitionCharacterAnimation = 58,
    HighScore = 59,
    TeacherPioneer = 60,
    BestCraftsmanship = 61,
    BestDefensiveMatch = 62,
    PlayOfTheDay = 63,
    Programming = 64,
    Professionalism = 65,
    GoldenCorndog = 66,
    MostImprovedTeam = 67,
    Wildcard = 68,
    ChairmansFinalist = 69,
    Other = 70,
    Autonomous = 71,
    InnovationChallengeSemiFinalist = 72,
    RookieGameChanger = 73,
    SkillsCompetitionWinner = 74,
    SkillsCompetitionFinalist = 75,
    RookieDesign = 76,
    EngineeringDesign = 77,
    Designers = 78,
    Concept = 79,
    GameDesignChallengeWinner = 80,
    GameDesignChallengeFinalist = 81,
}

impl AwardType {
    /// Every known category in code order
    pub const ALL: [AwardType; 82] = [
        AwardType::Chairmans,
        AwardType::Winner,
        AwardType::Finalist,
        AwardType::WoodieFlowers,
        AwardType::DeansList,
        AwardType::Volunteer,
        AwardType::Founders,
        AwardType::BartKamenMemorial,
        AwardType::MakeItLoud,
        AwardType::EngineeringInspiration,
        AwardType::RookieAllStar,
        AwardType::GraciousProfessionalism,
        AwardType::Coopertition,
        AwardType::Judges,
        AwardType::HighestRookieSeed,
        AwardType::RookieInspiration,
        AwardType::IndustrialDesign,
        AwardType::Quality,
        AwardType::Safety,
        AwardType::Sportsmanship,
        AwardType::Creativity,
        AwardType::EngineeringExcellence,
        AwardType::Entrepreneurship,
        AwardType::ExcellenceInDesign,
        AwardType::ExcellenceInDesignCad,
        AwardType::ExcellenceInDesignAnimation,
        AwardType::DrivingTomorrowsTechnology,
        AwardType::Imagery,
        AwardType::MediaAndTechnology,
        AwardType::InnovationInControl,
        AwardType::Spirit,
        AwardType::Website,
        AwardType::Visualization,
        AwardType::AutodeskInventor,
        AwardType::FutureInnovator,
        AwardType::RecognitionOfExtraordinaryService,
        AwardType::OutstandingCart,
        AwardType::WsuAimHigher,
        AwardType::LeadershipInControl,
        AwardType::Num1Seed,
        AwardType::IncrediblePlay,
        AwardType::PeoplesChoiceAnimation,
        AwardType::VisualizationRisingStar,
        AwardType::BestOffensiveRound,
        AwardType::BestPlayOfTheDay,
        AwardType::FeatherweightInTheFinals,
        AwardType::MostPhotogenic,
        AwardType::OutstandingDefense,
        AwardType::PowerToSimplify,
        AwardType::AgainstAllOdds,
        AwardType::RisingStar,
        AwardType::ChairmansHonorableMention,
        AwardType::ContentCommunicationHonorableMention,
        AwardType::TechnicalExecutionHonorableMention,
        AwardType::Realization,
        AwardType::RealizationHonorableMention,
        AwardType::DesignYourFuture,
        AwardType::DesignYourFutureHonorableMention,
        AwardType::SpecialRecognitionCharacterAnimation,
        AwardType::HighScore,
        AwardType::TeacherPioneer,
        AwardType::BestCraftsmanship,
        AwardType::BestDefensiveMatch,
        AwardType::PlayOfTheDay,
        AwardType::Programming,
        AwardType::Professionalism,
        AwardType::GoldenCorndog,
        AwardType::MostImprovedTeam,
        AwardType::Wildcard,
        AwardType::ChairmansFinalist,
        AwardType::Other,
        AwardType::Autonomous,
        AwardType::InnovationChallengeSemiFinalist,
        AwardType::RookieGameChanger,
        AwardType::SkillsCompetitionWinner,
        AwardType::SkillsCompetitionFinalist,
        AwardType::RookieDesign,
        AwardType::EngineeringDesign,
        AwardType::Designers,
        AwardType::Concept,
        AwardType::GameDesignChallengeWinner,
        AwardType::GameDesignChallengeFinalist,
    ];

    /// Numeric code used by the API
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Category for an API code, `None` for codes this build doesn't know
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Display name for categories that are searchable upstream.
    ///
    /// Obscure and retired categories have no name.
    pub const fn searchable_name(self) -> Option<&'static str> {
        match self {
            AwardType::Chairmans => Some("Chairman's"),
            AwardType::ChairmansFinalist => Some("Chairman's Finalist"),
            AwardType::EngineeringInspiration => Some("Engineering Inspiration"),
            AwardType::Coopertition => Some("Coopertition"),
            AwardType::Creativity => Some("Creativity"),
            AwardType::EngineeringExcellence => Some("Engineering Excellence"),
            AwardType::Entrepreneurship => Some("Entrepreneurship"),
            AwardType::DeansList => Some("Dean's List"),
            AwardType::BartKamenMemorial => Some("Bart Kamen Memorial"),
            AwardType::GraciousProfessionalism => Some("Gracious Professionalism"),
            AwardType::HighestRookieSeed => Some("Highest Rookie Seed"),
            AwardType::Imagery => Some("Imagery"),
            AwardType::IndustrialDesign => Some("Industrial Design"),
            AwardType::Safety => Some("Safety"),
            AwardType::InnovationInControl => Some("Innovation in Control"),
            AwardType::Quality => Some("Quality"),
            AwardType::RookieAllStar => Some("Rookie All Star"),
            AwardType::RookieInspiration => Some("Rookie Inspiration"),
            AwardType::Spirit => Some("Spirit"),
            AwardType::Volunteer => Some("Volunteer"),
            AwardType::WoodieFlowers => Some("Woodie Flowers"),
            AwardType::Judges => Some("Judges'"),
            _ => None,
        }
    }
}

impl fmt::Display for AwardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.searchable_name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{:?}", self),
        }
    }
}

/// A category counted toward hexfecta completions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedCategory {
    pub award_type: AwardType,
    pub name: &'static str,
}

impl TrackedCategory {
    /// Tracked category named after its upstream searchable name
    const fn searchable(award_type: AwardType) -> Self {
        match award_type.searchable_name() {
            Some(name) => Self { award_type, name },
            None => panic!("tracked category has no searchable name"),
        }
    }

    /// Tracked category with a name supplied here
    const fn named(award_type: AwardType, name: &'static str) -> Self {
        Self { award_type, name }
    }
}

/// The six hexfecta categories.
///
/// Autonomous has no upstream searchable name, so it is named here.
pub static TRACKED_CATEGORIES: [TrackedCategory; 6] = [
    TrackedCategory::searchable(AwardType::EngineeringExcellence),
    TrackedCategory::searchable(AwardType::Quality),
    TrackedCategory::searchable(AwardType::IndustrialDesign),
    TrackedCategory::searchable(AwardType::Creativity),
    TrackedCategory::named(AwardType::Autonomous, "Autonomous"),
    TrackedCategory::searchable(AwardType::InnovationInControl),
];

/// Tracked category for a raw API code
pub fn tracked_category(code: u16) -> Option<&'static TrackedCategory> {
    TRACKED_CATEGORIES
        .iter()
        .find(|c| c.award_type.code() == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_positions() {
        for (i, award_type) in AwardType::ALL.iter().enumerate() {
            assert_eq!(usize::from(award_type.code()), i, "{:?}", award_type);
        }
    }

    #[test]
    fn test_from_code_roundtrip_and_unknown() {
        assert_eq!(AwardType::from_code(21), Some(AwardType::EngineeringExcellence));
        assert_eq!(AwardType::from_code(71), Some(AwardType::Autonomous));
        assert_eq!(AwardType::from_code(81), Some(AwardType::GameDesignChallengeFinalist));
        assert_eq!(AwardType::from_code(82), None);
        assert_eq!(AwardType::from_code(u16::MAX), None);
    }

    #[test]
    fn test_tracked_table() {
        let names: Vec<&str> = TRACKED_CATEGORIES.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "Engineering Excellence",
                "Quality",
                "Industrial Design",
                "Creativity",
                "Autonomous",
                "Innovation in Control",
            ]
        );
        assert!(AwardType::Autonomous.searchable_name().is_none());
    }

    #[test]
    fn test_tracked_category_lookup() {
        assert_eq!(tracked_category(17).map(|c| c.name), Some("Quality"));
        assert_eq!(tracked_category(71).map(|c| c.name), Some("Autonomous"));
        assert!(tracked_category(30).is_none());
        assert!(tracked_category(500).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(AwardType::DeansList.to_string(), "Dean's List");
        assert_eq!(AwardType::GoldenCorndog.to_string(), "GoldenCorndog");
    }
}
