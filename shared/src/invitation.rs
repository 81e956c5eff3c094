//! Per-deployment invitation record
//!
//! One `InvitationConfig` is loaded when a page starts and handed to each
//! component that needs part of it. Nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

use crate::countdown::{CountdownError, TargetInstant};
use crate::gallery::{GalleryPreset, SortMode};

/// Name of the deployment config file (`invitation.toml`)
pub const INVITATION_CONFIG_NAME: &str = "invitation";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub bank: String,
    pub number: String,
}

impl Account {
    /// "Bank 1234-567-890000"
    pub fn display(&self) -> String {
        format!("{} {}", self.bank, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub name: String,
    pub account: Account,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub phone: String,
    pub father: Parent,
    pub mother: Parent,
    pub account: Account,
}

/// Wedding date and display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeddingTime {
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM:SS
    pub time: String,
    /// UTC offset, e.g. "+09:00"
    pub timezone: String,
    pub display_date: String,
    pub short_date: String,
    pub day_of_week: String,
}

impl WeddingTime {
    pub fn countdown_target(&self) -> Result<TargetInstant, CountdownError> {
        TargetInstant::parse(&self.date, &self.time, &self.timezone)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub hall: String,
    pub floor: String,
    pub full_name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub kakao_map_url: String,
    pub naver_map_url: String,
}

impl Venue {
    /// Check coordinates; returns a message for the venue panel when invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.coordinates.is_valid() {
            Ok(())
        } else {
            Err(format!(
                "Venue coordinates out of range: {}, {}",
                self.coordinates.lat, self.coordinates.lng
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    pub enabled: bool,
    pub autoplay: bool,
    pub src: String,
    /// 0.0 - 1.0
    pub volume: f32,
}

impl AudioSettings {
    pub fn effective_volume(&self) -> f32 {
        if self.volume.is_nan() {
            return 0.0;
        }
        self.volume.clamp(0.0, 1.0)
    }

    pub fn should_autoplay(&self) -> bool {
        self.enabled && self.autoplay
    }
}

/// Which family a listed account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Groom,
    Bride,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Groom => "Groom's side",
            Side::Bride => "Bride's side",
        }
    }
}

/// One row in the account panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow<'a> {
    pub relation: &'static str,
    pub holder: &'a str,
    pub account: &'a Account,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationConfig {
    pub groom: Person,
    pub bride: Person,
    pub wedding: WeddingTime,
    pub venue: Venue,
    pub audio: AudioSettings,
    /// Root directory scanned for gallery images
    pub assets_dir: String,
    #[serde(default)]
    pub galleries: Vec<GalleryPreset>,
}

impl InvitationConfig {
    pub fn countdown_target(&self) -> Result<TargetInstant, CountdownError> {
        self.wedding.countdown_target()
    }

    pub fn person(&self, side: Side) -> &Person {
        match side {
            Side::Groom => &self.groom,
            Side::Bride => &self.bride,
        }
    }

    /// Both sides' accounts for the account panel, groom first
    pub fn account_groups(&self) -> [(Side, [AccountRow<'_>; 3]); 2] {
        [
            (Side::Groom, self.account_rows(Side::Groom)),
            (Side::Bride, self.account_rows(Side::Bride)),
        ]
    }

    /// Accounts for one side, in panel order: the person, then father, mother
    pub fn account_rows(&self, side: Side) -> [AccountRow<'_>; 3] {
        let person = self.person(side);
        let own = match side {
            Side::Groom => "Groom",
            Side::Bride => "Bride",
        };
        [
            AccountRow {
                relation: own,
                holder: &person.name,
                account: &person.account,
            },
            AccountRow {
                relation: "Father",
                holder: &person.father.name,
                account: &person.father.account,
            },
            AccountRow {
                relation: "Mother",
                holder: &person.mother.name,
                account: &person.mother.account,
            },
        ]
    }

    /// "Groom & Bride"
    pub fn couple_names(&self) -> String {
        format!("{} & {}", self.groom.name, self.bride.name)
    }
}

fn placeholder_person(name: &str, father: &str, mother: &str) -> Person {
    let account = || Account {
        bank: "Bank".to_string(),
        number: "1234-567-890000".to_string(),
    };
    Person {
        name: name.to_string(),
        phone: "010-1234-5678".to_string(),
        father: Parent {
            name: father.to_string(),
            account: account(),
        },
        mother: Parent {
            name: mother.to_string(),
            account: account(),
        },
        account: account(),
    }
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            groom: placeholder_person("Groom", "Groom's Father", "Groom's Mother"),
            bride: placeholder_person("Bride", "Bride's Father", "Bride's Mother"),
            wedding: WeddingTime {
                date: "2025-12-20".to_string(),
                time: "13:00:00".to_string(),
                timezone: "+09:00".to_string(),
                display_date: "Saturday, December 20, 2025, 1 PM".to_string(),
                short_date: "2025 / 12 / 20".to_string(),
                day_of_week: "Saturday".to_string(),
            },
            venue: Venue {
                name: "CHA Biocomplex".to_string(),
                hall: "B1 International Conference Hall".to_string(),
                floor: "B1".to_string(),
                full_name: "CHA Biocomplex B1 International Conference Hall".to_string(),
                address: "335 Pangyo-ro, Bundang-gu, Seongnam-si, Gyeonggi-do".to_string(),
                coordinates: Coordinates {
                    lat: 37.403848,
                    lng: 127.111674,
                },
                kakao_map_url: "https://place.map.kakao.com/25769916".to_string(),
                naver_map_url: "https://naver.me/xExWFUjt".to_string(),
            },
            audio: AudioSettings {
                enabled: true,
                autoplay: false,
                src: "assets/audio/wedding.mp3".to_string(),
                volume: 0.5,
            },
            assets_dir: "assets".to_string(),
            galleries: vec![
                GalleryPreset {
                    folder: "studio".to_string(),
                    title: "Studio".to_string(),
                    sort: SortMode::NaturalNumeric,
                },
                GalleryPreset {
                    folder: "best".to_string(),
                    title: "Best Cuts".to_string(),
                    sort: SortMode::NaturalNumeric,
                },
                GalleryPreset {
                    folder: "daily".to_string(),
                    title: "Daily".to_string(),
                    sort: SortMode::Lexicographic,
                },
            ],
        }
    }
}
