use serde::{Deserialize, Serialize};

/// Score pre-filled for every performance rating year on a fresh adviser record.
pub const DEFAULT_PERFORMANCE_RATING: f64 = 4.0;

/// School years covered by the adviser performance rating window, newest first.
pub const RATING_YEARS: [&str; 5] = [
    "2024-2025",
    "2023-2024",
    "2022-2023",
    "2021-2022",
    "2020-2021",
];

/// Identifier wrapper for entries appended to a record's collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    pub(crate) fn from_sequence(sequence: u64) -> Self {
        Self(format!("entry-{sequence:06}"))
    }
}

/// Jurisdictional scope of an award, ordered from widest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    National,
    Regional,
    Division,
    District,
    School,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::National,
        Level::Regional,
        Level::Division,
        Level::District,
        Level::School,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Level::National => "National",
            Level::Regional => "Regional",
            Level::Division => "Division",
            Level::District => "District",
            Level::School => "School",
        }
    }
}

/// Placement earned in a contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
    #[serde(rename = "5th")]
    Fifth,
    #[serde(rename = "6th")]
    Sixth,
    #[serde(rename = "7th")]
    Seventh,
}

impl Rank {
    pub const ALL: [Rank; 7] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Rank::First => "1st",
            Rank::Second => "2nd",
            Rank::Third => "3rd",
            Rank::Fourth => "4th",
            Rank::Fifth => "5th",
            Rank::Sixth => "6th",
            Rank::Seventh => "7th",
        }
    }
}

/// Officer role held in a press organisation or guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    President,
    #[serde(rename = "Vice President")]
    VicePresident,
    #[serde(rename = "Other positions")]
    Other,
}

impl Position {
    pub const fn label(self) -> &'static str {
        match self {
            Position::President => "President",
            Position::VicePresident => "Vice President",
            Position::Other => "Other positions",
        }
    }
}

/// Editorial role a campus journalist holds on the school paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PublicationPosition {
    #[serde(rename = "Editor in Chief")]
    EditorInChief,
    #[serde(rename = "Associate Editor")]
    AssociateEditor,
    #[serde(rename = "Section Editor")]
    SectionEditor,
    #[serde(rename = "Writer/Contributor/Others")]
    Writer,
}

impl PublicationPosition {
    pub const fn label(self) -> &'static str {
        match self {
            PublicationPosition::EditorInChief => "Editor in Chief",
            PublicationPosition::AssociateEditor => "Associate Editor",
            PublicationPosition::SectionEditor => "Section Editor",
            PublicationPosition::Writer => "Writer/Contributor/Others",
        }
    }
}

/// Academic standing of a campus journalist.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AcademicRank {
    #[serde(rename = "With Highest Honors")]
    Highest,
    #[serde(rename = "With High Honors")]
    High,
    #[serde(rename = "With Honors")]
    Honors,
    #[serde(rename = "89-85 Average")]
    Average,
    #[default]
    None,
}

impl AcademicRank {
    pub const fn label(self) -> &'static str {
        match self {
            AcademicRank::Highest => "With Highest Honors",
            AcademicRank::High => "With High Honors",
            AcademicRank::Honors => "With Honors",
            AcademicRank::Average => "89-85 Average",
            AcademicRank::None => "None",
        }
    }
}

/// The two mutually exclusive nomination categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NominationType {
    Adviser,
    Journalist,
}

impl NominationType {
    pub const fn label(self) -> &'static str {
        match self {
            NominationType::Adviser => "Outstanding School Paper Adviser",
            NominationType::Journalist => "Outstanding Campus Journalist",
        }
    }
}

/// Schools division offices of the National Capital Region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Division {
    Caloocan,
    #[serde(rename = "Las Piñas")]
    LasPinas,
    Makati,
    Malabon,
    Mandaluyong,
    Manila,
    Marikina,
    Muntinlupa,
    Navotas,
    #[serde(rename = "Parañaque")]
    Paranaque,
    Pasay,
    Pasig,
    #[serde(rename = "Quezon City")]
    QuezonCity,
    #[serde(rename = "San Juan")]
    SanJuan,
    #[serde(rename = "Taguig City and Pateros (TAPAT)")]
    TaguigPateros,
    Valenzuela,
}

impl Division {
    pub const ALL: [Division; 16] = [
        Division::Caloocan,
        Division::LasPinas,
        Division::Makati,
        Division::Malabon,
        Division::Mandaluyong,
        Division::Manila,
        Division::Marikina,
        Division::Muntinlupa,
        Division::Navotas,
        Division::Paranaque,
        Division::Pasay,
        Division::Pasig,
        Division::QuezonCity,
        Division::SanJuan,
        Division::TaguigPateros,
        Division::Valenzuela,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Division::Caloocan => "Caloocan",
            Division::LasPinas => "Las Piñas",
            Division::Makati => "Makati",
            Division::Malabon => "Malabon",
            Division::Mandaluyong => "Mandaluyong",
            Division::Manila => "Manila",
            Division::Marikina => "Marikina",
            Division::Muntinlupa => "Muntinlupa",
            Division::Navotas => "Navotas",
            Division::Paranaque => "Parañaque",
            Division::Pasay => "Pasay",
            Division::Pasig => "Pasig",
            Division::QuezonCity => "Quezon City",
            Division::SanJuan => "San Juan",
            Division::TaguigPateros => "Taguig City and Pateros (TAPAT)",
            Division::Valenzuela => "Valenzuela",
        }
    }

    /// Case-insensitive match against the division labels.
    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|division| division.label().eq_ignore_ascii_case(needle))
    }
}

/// One year of the adviser's performance rating history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub year: String,
    pub score: f64,
}

/// Contest placement or award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: EntryId,
    pub level: Level,
    pub rank: Rank,
    #[serde(default)]
    pub year: String,
}

/// Service-type contribution scored by level alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub id: EntryId,
    pub level: Level,
}

/// Officer role held at a given level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadershipEntry {
    pub id: EntryId,
    pub level: Level,
    pub position: Position,
}

/// Panel interview sub-scores, each within `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewScores {
    pub principles: f64,
    pub leadership: f64,
    pub engagement: f64,
    pub commitment: f64,
    pub communication: f64,
}

impl InterviewScores {
    pub fn sum(&self) -> f64 {
        self.principles + self.leadership + self.engagement + self.commitment + self.communication
    }

    pub fn set(&mut self, criterion: InterviewCriterion, score: f64) {
        let slot = match criterion {
            InterviewCriterion::Principles => &mut self.principles,
            InterviewCriterion::Leadership => &mut self.leadership,
            InterviewCriterion::Engagement => &mut self.engagement,
            InterviewCriterion::Commitment => &mut self.commitment,
            InterviewCriterion::Communication => &mut self.communication,
        };
        *slot = score;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewCriterion {
    Principles,
    Leadership,
    Engagement,
    Commitment,
    Communication,
}

/// Consolidated means-of-verification document, already base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovFile {
    pub name: String,
    pub data: String,
    pub mime_type: String,
}

/// Who is being nominated and where from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateIdentity {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub division: Option<Division>,
}

/// Collections scored under the adviser rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdviserFields {
    pub performance_ratings: Vec<RatingEntry>,
    pub individual_contests: Vec<Achievement>,
    pub group_contests: Vec<Achievement>,
    pub special_awards: Vec<Achievement>,
    pub publication_contests: Vec<Achievement>,
    pub leadership: Vec<LeadershipEntry>,
    pub extension_services: Vec<ServiceEntry>,
    pub innovations: Vec<ServiceEntry>,
    pub speakership: Vec<ServiceEntry>,
    pub published_books: Vec<ServiceEntry>,
    pub published_articles: Vec<ServiceEntry>,
}

impl AdviserFields {
    pub fn with_default_rating(score: f64) -> Self {
        Self {
            performance_ratings: RATING_YEARS
                .iter()
                .map(|year| RatingEntry {
                    year: (*year).to_string(),
                    score,
                })
                .collect(),
            individual_contests: Vec::new(),
            group_contests: Vec::new(),
            special_awards: Vec::new(),
            publication_contests: Vec::new(),
            leadership: Vec::new(),
            extension_services: Vec::new(),
            innovations: Vec::new(),
            speakership: Vec::new(),
            published_books: Vec::new(),
            published_articles: Vec::new(),
        }
    }
}

impl Default for AdviserFields {
    fn default() -> Self {
        Self::with_default_rating(DEFAULT_PERFORMANCE_RATING)
    }
}

/// Collections scored under the journalist rubric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalistFields {
    pub academic_rank: AcademicRank,
    pub pub_position: Option<PublicationPosition>,
    pub individual_contests: Vec<Achievement>,
    pub group_contests: Vec<Achievement>,
    pub special_awards: Vec<Achievement>,
    pub publication_contests: Vec<Achievement>,
    pub guild_leadership: Vec<LeadershipEntry>,
    pub extension_services: Vec<ServiceEntry>,
    pub published_works: Vec<ServiceEntry>,
    pub trainings_attended: Vec<ServiceEntry>,
}

/// Mode-specific half of a record. The variant decides which rubric and
/// aggregation rules apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nominationType", rename_all = "snake_case")]
pub enum Nomination {
    Adviser(AdviserFields),
    Journalist(JournalistFields),
}

impl Nomination {
    pub fn kind(&self) -> NominationType {
        match self {
            Nomination::Adviser(_) => NominationType::Adviser,
            Nomination::Journalist(_) => NominationType::Journalist,
        }
    }

    pub fn achievements_mut(
        &mut self,
        category: AchievementCategory,
    ) -> &mut Vec<Achievement> {
        match (self, category) {
            (Nomination::Adviser(fields), AchievementCategory::IndividualContests) => {
                &mut fields.individual_contests
            }
            (Nomination::Adviser(fields), AchievementCategory::GroupContests) => {
                &mut fields.group_contests
            }
            (Nomination::Adviser(fields), AchievementCategory::SpecialAwards) => {
                &mut fields.special_awards
            }
            (Nomination::Adviser(fields), AchievementCategory::PublicationContests) => {
                &mut fields.publication_contests
            }
            (Nomination::Journalist(fields), AchievementCategory::IndividualContests) => {
                &mut fields.individual_contests
            }
            (Nomination::Journalist(fields), AchievementCategory::GroupContests) => {
                &mut fields.group_contests
            }
            (Nomination::Journalist(fields), AchievementCategory::SpecialAwards) => {
                &mut fields.special_awards
            }
            (Nomination::Journalist(fields), AchievementCategory::PublicationContests) => {
                &mut fields.publication_contests
            }
        }
    }

    /// Service collection for `category`, or `None` when the category does not
    /// exist in this nomination mode.
    pub fn services_mut(&mut self, category: ServiceCategory) -> Option<&mut Vec<ServiceEntry>> {
        match (self, category) {
            (Nomination::Adviser(fields), ServiceCategory::ExtensionServices) => {
                Some(&mut fields.extension_services)
            }
            (Nomination::Adviser(fields), ServiceCategory::Innovations) => {
                Some(&mut fields.innovations)
            }
            (Nomination::Adviser(fields), ServiceCategory::Speakership) => {
                Some(&mut fields.speakership)
            }
            (Nomination::Adviser(fields), ServiceCategory::PublishedBooks) => {
                Some(&mut fields.published_books)
            }
            (Nomination::Adviser(fields), ServiceCategory::PublishedArticles) => {
                Some(&mut fields.published_articles)
            }
            (Nomination::Journalist(fields), ServiceCategory::ExtensionServices) => {
                Some(&mut fields.extension_services)
            }
            (Nomination::Journalist(fields), ServiceCategory::PublishedWorks) => {
                Some(&mut fields.published_works)
            }
            (Nomination::Journalist(fields), ServiceCategory::TrainingsAttended) => {
                Some(&mut fields.trainings_attended)
            }
            _ => None,
        }
    }

    pub fn leadership_mut(&mut self) -> &mut Vec<LeadershipEntry> {
        match self {
            Nomination::Adviser(fields) => &mut fields.leadership,
            Nomination::Journalist(fields) => &mut fields.guild_leadership,
        }
    }

    /// Drop the entry with `id` from whichever collection holds it.
    pub fn remove_entry(&mut self, id: &EntryId) -> bool {
        let mut removed = false;
        for category in AchievementCategory::ALL {
            removed |= remove_by_id(self.achievements_mut(category), id, |entry| &entry.id);
        }
        for category in ServiceCategory::ALL {
            if let Some(entries) = self.services_mut(category) {
                removed |= remove_by_id(entries, id, |entry| &entry.id);
            }
        }
        removed |= remove_by_id(self.leadership_mut(), id, |entry| &entry.id);
        removed
    }
}

fn remove_by_id<T>(entries: &mut Vec<T>, id: &EntryId, key: impl Fn(&T) -> &EntryId) -> bool {
    let before = entries.len();
    entries.retain(|entry| key(entry) != id);
    entries.len() != before
}

/// Contest-style categories carrying a level and a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    IndividualContests,
    GroupContests,
    SpecialAwards,
    PublicationContests,
}

impl AchievementCategory {
    pub const ALL: [AchievementCategory; 4] = [
        AchievementCategory::IndividualContests,
        AchievementCategory::GroupContests,
        AchievementCategory::SpecialAwards,
        AchievementCategory::PublicationContests,
    ];
}

/// Categories scored by level only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    ExtensionServices,
    Innovations,
    Speakership,
    PublishedBooks,
    PublishedArticles,
    PublishedWorks,
    TrainingsAttended,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 7] = [
        ServiceCategory::ExtensionServices,
        ServiceCategory::Innovations,
        ServiceCategory::Speakership,
        ServiceCategory::PublishedBooks,
        ServiceCategory::PublishedArticles,
        ServiceCategory::PublishedWorks,
        ServiceCategory::TrainingsAttended,
    ];
}

/// Root entity for an in-progress nomination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    #[serde(flatten)]
    pub identity: CandidateIdentity,
    #[serde(flatten)]
    pub nomination: Nomination,
    #[serde(default)]
    pub interview: InterviewScores,
    #[serde(default)]
    pub mov_file: Option<MovFile>,
    /// Sequence number handed to the next appended entry.
    #[serde(default = "first_entry_sequence")]
    pub next_entry: u64,
}

fn first_entry_sequence() -> u64 {
    1
}

impl CandidateRecord {
    pub fn new(kind: NominationType) -> Self {
        Self::with_default_rating(kind, DEFAULT_PERFORMANCE_RATING)
    }

    /// Fresh record whose adviser ratings start at `default_rating`.
    pub fn with_default_rating(kind: NominationType, default_rating: f64) -> Self {
        let nomination = match kind {
            NominationType::Adviser => {
                Nomination::Adviser(AdviserFields::with_default_rating(default_rating))
            }
            NominationType::Journalist => Nomination::Journalist(JournalistFields::default()),
        };

        Self {
            identity: CandidateIdentity::default(),
            nomination,
            interview: InterviewScores::default(),
            mov_file: None,
            next_entry: first_entry_sequence(),
        }
    }

    pub fn kind(&self) -> NominationType {
        self.nomination.kind()
    }

    /// Hands out the next entry id, or `None` once the counter cannot advance.
    pub(crate) fn allocate_entry_id(&mut self) -> Option<EntryId> {
        let next = self.next_entry.checked_add(1)?;
        let id = EntryId::from_sequence(self.next_entry);
        self.next_entry = next;
        Some(id)
    }
}
