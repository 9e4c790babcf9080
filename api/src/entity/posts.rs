use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_name = "type")]
    pub post_type: String,
    pub title: String,
    pub author_id: Uuid,
    pub topic_id: Option<Uuid>,
    pub is_visible: bool,
    pub is_public: bool,
    pub is_shadow_banned: bool,
    pub is_visible_on_main_page: bool,
    pub is_pinned_until: Option<DateTimeWithTimeZone>,
    pub upvotes: i32,
    pub comment_count: i32,
    pub view_count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub last_activity_at: DateTimeWithTimeZone,
    pub published_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::topics::Entity",
        from = "Column::TopicId",
        to = "super::topics::Column::Id",
        on_delete = "SetNull"
    )]
    Topics,
    #[sea_orm(has_many = "super::post_votes::Entity")]
    PostVotes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topics.def()
    }
}

impl Related<super::post_votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostVotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
