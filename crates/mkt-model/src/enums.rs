//! Type-safe enumerations for the campaign data model.
//!
//! Raw snapshots carry these as plain strings; the enums are the single
//! source of truth for the closed value sets the normalizer validates
//! against.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Customer gender code as recorded in the raw feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// All values accepted for the `gender` column.
    pub const VALUES: &'static [&'static str] = &["M", "F"];

    /// Returns the single-letter code used in snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            other => Err(format!("unknown gender code: {other}")),
        }
    }
}

/// Delivery channel a campaign ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignChannel {
    Email,
    SocialMedia,
    Search,
    Display,
}

impl CampaignChannel {
    /// All values accepted for the `campaign_channel` column.
    pub const VALUES: &'static [&'static str] = &["email", "social_media", "search", "display"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignChannel::Email => "email",
            CampaignChannel::SocialMedia => "social_media",
            CampaignChannel::Search => "search",
            CampaignChannel::Display => "display",
        }
    }
}

impl fmt::Display for CampaignChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CampaignChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "email" => Ok(CampaignChannel::Email),
            "social_media" => Ok(CampaignChannel::SocialMedia),
            "search" => Ok(CampaignChannel::Search),
            "display" => Ok(CampaignChannel::Display),
            other => Err(format!("unknown campaign channel: {other}")),
        }
    }
}

/// Campaign objective.
///
/// `Retargeting` carries an extra rule: retargeted customers have their
/// `previous_purchases` forced to zero during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignType {
    BrandAwareness,
    ProductLaunch,
    Seasonal,
    Retargeting,
}

impl CampaignType {
    /// All values accepted for the `campaign_type` column.
    pub const VALUES: &'static [&'static str] = &[
        "brand_awareness",
        "product_launch",
        "seasonal",
        "retargeting",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::BrandAwareness => "brand_awareness",
            CampaignType::ProductLaunch => "product_launch",
            CampaignType::Seasonal => "seasonal",
            CampaignType::Retargeting => "retargeting",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CampaignType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "brand_awareness" => Ok(CampaignType::BrandAwareness),
            "product_launch" => Ok(CampaignType::ProductLaunch),
            "seasonal" => Ok(CampaignType::Seasonal),
            "retargeting" => Ok(CampaignType::Retargeting),
            other => Err(format!("unknown campaign type: {other}")),
        }
    }
}

/// Ad platform the spend was booked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvertisingPlatform {
    GoogleAds,
    FacebookAds,
    InstagramAds,
    EmailCampaign,
}

impl AdvertisingPlatform {
    /// All values accepted for the `advertising_platform` column.
    pub const VALUES: &'static [&'static str] = &[
        "Google Ads",
        "Facebook Ads",
        "Instagram Ads",
        "Email Campaign",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdvertisingPlatform::GoogleAds => "Google Ads",
            AdvertisingPlatform::FacebookAds => "Facebook Ads",
            AdvertisingPlatform::InstagramAds => "Instagram Ads",
            AdvertisingPlatform::EmailCampaign => "Email Campaign",
        }
    }
}

impl fmt::Display for AdvertisingPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdvertisingPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Google Ads" => Ok(AdvertisingPlatform::GoogleAds),
            "Facebook Ads" => Ok(AdvertisingPlatform::FacebookAds),
            "Instagram Ads" => Ok(AdvertisingPlatform::InstagramAds),
            "Email Campaign" => Ok(AdvertisingPlatform::EmailCampaign),
            other => Err(format!("unknown advertising platform: {other}")),
        }
    }
}
