use sea_orm::prelude::Expr;
use sea_orm::sea_query::{ExprTrait, Func, IntoColumnRef, JoinType, LikeExpr, SimpleExpr};
use sea_orm::*;

use crate::models::designers::{self, CreateDesigner};
use crate::models::dresses::{self, CreateDress};
use crate::models::{Page, PageQuery, dress_sizes, dress_styles, page_count, sizes, styles};

/// Designers shown per listing page.
pub const DESIGNERS_PER_PAGE: u64 = 2;
/// Dresses shown per listing page.
pub const DRESSES_PER_PAGE: u64 = 4;

// ── Designers ──

pub async fn count_designers(db: &DatabaseConnection) -> Result<u64, DbErr> {
    designers::Entity::find().count(db).await
}

/// Designers ordered by (name, surname).
pub async fn get_designers_page(
    db: &DatabaseConnection,
    query: &PageQuery,
) -> Result<Page<designers::Model>, DbErr> {
    let select = designers::Entity::find()
        .order_by_asc(designers::Column::Name)
        .order_by_asc(designers::Column::Surname)
        .order_by_asc(designers::Column::Id);
    let paginator = select.paginate(db, DESIGNERS_PER_PAGE);
    let total = paginator.num_items().await?;
    let num_pages = page_count(total, DESIGNERS_PER_PAGE);
    let page = query.resolve(num_pages);
    let items = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        items,
        page,
        num_pages,
        total,
        per_page: DESIGNERS_PER_PAGE,
    })
}

pub async fn get_designer_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<designers::Model>, DbErr> {
    designers::Entity::find_by_id(id).one(db).await
}

pub async fn get_dresses_by_designer(
    db: &DatabaseConnection,
    designer_id: i32,
) -> Result<Vec<dresses::Model>, DbErr> {
    dresses::Entity::find()
        .filter(dresses::Column::DesignerId.eq(designer_id))
        .order_by_asc(dresses::Column::Id)
        .all(db)
        .await
}

pub async fn insert_designer(
    db: &DatabaseConnection,
    input: CreateDesigner,
) -> Result<designers::Model, DbErr> {
    designers::ActiveModel {
        name: Set(input.name),
        surname: Set(input.surname),
        description: Set(input.description),
        photo: Set(input.photo),
        ..Default::default()
    }
    .insert(db)
    .await
}

// ── Sizes & styles ──

pub async fn insert_size(db: &DatabaseConnection, name: String) -> Result<sizes::Model, DbErr> {
    sizes::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_style(db: &DatabaseConnection, name: String) -> Result<styles::Model, DbErr> {
    styles::ActiveModel {
        name: Set(name),
        ..Default::default()
    }
    .insert(db)
    .await
}

// ── Dresses ──

pub async fn count_dresses(db: &DatabaseConnection) -> Result<u64, DbErr> {
    dresses::Entity::find().count(db).await
}

/// Dresses in catalog order.
pub async fn get_dresses_page(
    db: &DatabaseConnection,
    query: &PageQuery,
) -> Result<Page<dresses::Model>, DbErr> {
    let select = dresses::Entity::find().order_by_asc(dresses::Column::Id);
    let paginator = select.paginate(db, DRESSES_PER_PAGE);
    let total = paginator.num_items().await?;
    let num_pages = page_count(total, DRESSES_PER_PAGE);
    let page = query.resolve(num_pages);
    let items = paginator.fetch_page(page - 1).await?;

    Ok(Page {
        items,
        page,
        num_pages,
        total,
        per_page: DRESSES_PER_PAGE,
    })
}

pub async fn get_dress_by_id(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<dresses::Model>, DbErr> {
    dresses::Entity::find_by_id(id).one(db).await
}

pub async fn item_code_exists(db: &DatabaseConnection, item_code: &str) -> Result<bool, DbErr> {
    let count = dresses::Entity::find()
        .filter(dresses::Column::ItemCode.eq(item_code))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Sizes the dress is offered in.
pub async fn get_sizes_for_dress(
    db: &DatabaseConnection,
    dress: &dresses::Model,
) -> Result<Vec<sizes::Model>, DbErr> {
    dress
        .find_related(sizes::Entity)
        .order_by_asc(sizes::Column::Id)
        .all(db)
        .await
}

pub async fn get_styles_for_dress(
    db: &DatabaseConnection,
    dress: &dresses::Model,
) -> Result<Vec<styles::Model>, DbErr> {
    dress
        .find_related(styles::Entity)
        .order_by_asc(styles::Column::Id)
        .all(db)
        .await
}

/// Whether `size_id` is one of the sizes the dress is offered in.
pub async fn size_offered_for_dress(
    db: &DatabaseConnection,
    dress_id: i32,
    size_id: i32,
) -> Result<bool, DbErr> {
    Ok(dress_sizes::Entity::find_by_id((dress_id, size_id))
        .one(db)
        .await?
        .is_some())
}

/// Insert a dress and its size/style associations in one transaction.
/// Repeated size or style ids are stored once.
pub async fn insert_dress(
    db: &DatabaseConnection,
    mut input: CreateDress,
) -> Result<dresses::Model, DbErr> {
    input.size_ids.sort_unstable();
    input.size_ids.dedup();
    input.style_ids.sort_unstable();
    input.style_ids.dedup();

    let txn = db.begin().await?;

    let dress = dresses::ActiveModel {
        color: Set(input.color),
        item_code: Set(input.item_code),
        description: Set(input.description),
        photo: Set(input.photo),
        designer_id: Set(input.designer_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if !input.size_ids.is_empty() {
        let rows = input.size_ids.iter().map(|&size_id| dress_sizes::ActiveModel {
            dress_id: Set(dress.id),
            size_id: Set(size_id),
        });
        dress_sizes::Entity::insert_many(rows)
            .exec_without_returning(&txn)
            .await?;
    }

    if !input.style_ids.is_empty() {
        let rows = input.style_ids.iter().map(|&style_id| dress_styles::ActiveModel {
            dress_id: Set(dress.id),
            style_id: Set(style_id),
        });
        dress_styles::Entity::insert_many(rows)
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;
    Ok(dress)
}

/// Delete a dress. Its rentals, reviews and associations are removed with it.
pub async fn delete_dress(db: &DatabaseConnection, id: i32) -> Result<DeleteResult, DbErr> {
    dresses::Entity::delete_by_id(id).exec(db).await
}

// ── Search ──

/// `%text%` for a LIKE against a lowercased column. Backslash, `%` and `_`
/// in `text` are escaped with a backslash.
pub fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn lower_like<C: IntoColumnRef>(column: C, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Every dress whose color, item code or any style name contains `text`,
/// case-insensitively. Each dress is listed once, in catalog order.
pub async fn search_dresses(
    db: &DatabaseConnection,
    text: &str,
) -> Result<Vec<dresses::Model>, DbErr> {
    let pattern = contains_pattern(text);

    dresses::Entity::find()
        .join(JoinType::LeftJoin, dress_styles::Relation::Dress.def().rev())
        .join(JoinType::LeftJoin, dress_styles::Relation::Style.def())
        .filter(
            Condition::any()
                .add(lower_like((dresses::Entity, dresses::Column::Color), &pattern))
                .add(lower_like((dresses::Entity, dresses::Column::ItemCode), &pattern))
                .add(lower_like((styles::Entity, styles::Column::Name), &pattern)),
        )
        .distinct()
        .order_by_asc(dresses::Column::Id)
        .all(db)
        .await
}
