use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(users_table()).await?;
        manager.create_table(calculations_table()).await?;
        manager.create_index(calculations_user_index()).await?;
        manager.create_table(leads_table()).await?;
        manager.create_table(country_rates_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CountryRates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Calculations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn users_table() -> TableCreateStatement {
    Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Users::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Users::OpenId)
                .string_len(64)
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(Users::Name).text())
        .col(ColumnDef::new(Users::Email).string_len(320))
        .col(ColumnDef::new(Users::LoginMethod).string_len(64))
        .col(
            ColumnDef::new(Users::Role)
                .string_len(16)
                .not_null()
                .default("user"),
        )
        .col(
            ColumnDef::new(Users::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Users::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(
            ColumnDef::new(Users::LastSignedIn)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

fn calculations_table() -> TableCreateStatement {
    Table::create()
        .table(Calculations::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Calculations::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Calculations::UserId).integer())
        .col(
            ColumnDef::new(Calculations::Country)
                .string_len(100)
                .not_null(),
        )
        .col(ColumnDef::new(Calculations::Volume).big_integer().not_null())
        .col(
            ColumnDef::new(Calculations::MessageCategory)
                .string_len(32)
                .not_null(),
        )
        .col(
            ColumnDef::new(Calculations::Currency)
                .string_len(8)
                .not_null(),
        )
        .col(
            ColumnDef::new(Calculations::TotalCost)
                .string_len(50)
                .not_null(),
        )
        .col(
            ColumnDef::new(Calculations::CostPerMessage)
                .string_len(50)
                .not_null(),
        )
        .col(ColumnDef::new(Calculations::ExchangeRate).string_len(20))
        .col(
            ColumnDef::new(Calculations::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_calculations_user_id")
                .from(Calculations::Table, Calculations::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn leads_table() -> TableCreateStatement {
    Table::create()
        .table(Leads::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Leads::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Leads::Name).string_len(255).not_null())
        .col(ColumnDef::new(Leads::Surname).string_len(255))
        .col(ColumnDef::new(Leads::Phone).string_len(50).not_null())
        .col(ColumnDef::new(Leads::Email).string_len(320).not_null())
        .col(ColumnDef::new(Leads::Company).string_len(255).not_null())
        .col(ColumnDef::new(Leads::Country).string_len(100))
        .col(ColumnDef::new(Leads::Volume).big_integer())
        .col(ColumnDef::new(Leads::MessageCategory).string_len(32))
        .col(
            ColumnDef::new(Leads::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

fn country_rates_table() -> TableCreateStatement {
    Table::create()
        .table(CountryRates::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(CountryRates::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(CountryRates::Country)
                .string_len(100)
                .not_null()
                .unique_key(),
        )
        .col(
            ColumnDef::new(CountryRates::MarketingRate)
                .string_len(20)
                .not_null(),
        )
        .col(
            ColumnDef::new(CountryRates::UtilityRate)
                .string_len(20)
                .not_null(),
        )
        .col(
            ColumnDef::new(CountryRates::AuthenticationRate)
                .string_len(20)
                .not_null(),
        )
        .col(
            ColumnDef::new(CountryRates::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

fn calculations_user_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_calculations_user_id")
        .table(Calculations::Table)
        .col(Calculations::UserId)
        .if_not_exists()
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    OpenId,
    Name,
    Email,
    LoginMethod,
    Role,
    CreatedAt,
    UpdatedAt,
    LastSignedIn,
}

#[derive(DeriveIden)]
enum Calculations {
    Table,
    Id,
    UserId,
    Country,
    Volume,
    MessageCategory,
    Currency,
    TotalCost,
    CostPerMessage,
    ExchangeRate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
    Name,
    Surname,
    Phone,
    Email,
    Company,
    Country,
    Volume,
    MessageCategory,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CountryRates {
    Table,
    Id,
    Country,
    MarketingRate,
    UtilityRate,
    AuthenticationRate,
    UpdatedAt,
}
