use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub full_name: String,
    #[sea_orm(unique)]
    pub session_token_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub last_activity_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::posts::Entity")]
    Posts,
    #[sea_orm(has_many = "super::post_votes::Entity")]
    PostVotes,
}

impl Related<super::posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::post_votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostVotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
