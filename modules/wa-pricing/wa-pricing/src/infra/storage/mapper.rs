use anyhow::Context;
use wa_pricing_sdk::models::{Calculation, CountryRate, Lead, MessageCategory, User};

use super::entity::{calculation, country_rate, lead, user};

fn volume_from_db(volume: i64) -> anyhow::Result<u64> {
    u64::try_from(volume).with_context(|| format!("stored volume {volume} is negative"))
}

pub(super) fn volume_to_db(volume: u64) -> anyhow::Result<i64> {
    i64::try_from(volume).with_context(|| format!("volume {volume} exceeds storage range"))
}

impl TryFrom<user::Model> for User {
    type Error = anyhow::Error;

    fn try_from(m: user::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: m.id,
            role: m
                .role
                .parse()
                .with_context(|| format!("user {}: bad role", m.id))?,
            open_id: m.open_id,
            name: m.name,
            email: m.email,
            login_method: m.login_method,
            created_at: m.created_at,
            updated_at: m.updated_at,
            last_signed_in: m.last_signed_in,
        })
    }
}

impl TryFrom<calculation::Model> for Calculation {
    type Error = anyhow::Error;

    fn try_from(m: calculation::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: m.id,
            user_id: m.user_id,
            volume: volume_from_db(m.volume)?,
            message_category: m
                .message_category
                .parse()
                .with_context(|| format!("calculation {}: bad message category", m.id))?,
            currency: m
                .currency
                .parse()
                .with_context(|| format!("calculation {}: bad currency", m.id))?,
            country: m.country,
            total_cost: m.total_cost,
            cost_per_message: m.cost_per_message,
            exchange_rate: m.exchange_rate,
            created_at: m.created_at,
        })
    }
}

impl TryFrom<lead::Model> for Lead {
    type Error = anyhow::Error;

    fn try_from(m: lead::Model) -> anyhow::Result<Self> {
        Ok(Self {
            id: m.id,
            volume: m.volume.map(volume_from_db).transpose()?,
            message_category: m
                .message_category
                .as_deref()
                .map(str::parse::<MessageCategory>)
                .transpose()
                .with_context(|| format!("lead {}: bad message category", m.id))?,
            name: m.name,
            surname: m.surname,
            phone: m.phone,
            email: m.email,
            company: m.company,
            country: m.country,
            created_at: m.created_at,
        })
    }
}

impl From<country_rate::Model> for CountryRate {
    fn from(m: country_rate::Model) -> Self {
        Self {
            id: m.id,
            country: m.country,
            marketing_rate: m.marketing_rate,
            utility_rate: m.utility_rate,
            authentication_rate: m.authentication_rate,
            updated_at: m.updated_at,
        }
    }
}
