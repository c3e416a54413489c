use super::prelude::*;
use crate::text::slugify;

#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: String,
    pub slug: Option<String>,
    pub parent_id: Option<String>,
    pub marker_icon_slug: Option<String>,
    pub marker_icon_width: Option<u32>,
    pub marker_icon_height: Option<u32>,
}

pub fn create_new_category<R: CategoryRepo>(repo: &R, c: NewCategory) -> Result<Category> {
    if c.name.trim().is_empty() {
        return Err(Error::Title);
    }
    let slug = c
        .slug
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| slugify(&c.name));
    if slug.is_empty() {
        return Err(Error::InvalidSlug);
    }
    let marker_icon = MarkerIcon {
        slug: c.marker_icon_slug.unwrap_or_else(|| slug.clone()),
        original_width: c.marker_icon_width.unwrap_or(MarkerIcon::DEFAULT_SIZE),
        original_height: c.marker_icon_height.unwrap_or(MarkerIcon::DEFAULT_SIZE),
    };
    let category = Category {
        id: Id::new(),
        name: c.name,
        slug,
        parent_id: c.parent_id.filter(|p| !p.trim().is_empty()).map(Id::from),
        marker_icon,
    };
    repo.create_category(&category)?;
    Ok(category)
}

pub fn update_category<R: CategoryRepo>(repo: &R, category: &Category) -> Result<()> {
    if category.name.trim().is_empty() {
        return Err(Error::Title);
    }
    if category.slug.trim().is_empty() {
        return Err(Error::InvalidSlug);
    }
    Ok(repo.update_category(category)?)
}

pub fn delete_category<R: CategoryRepo>(repo: &R, id: &Id) -> Result<()> {
    Ok(repo.delete_category(id)?)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};

    #[test]
    fn default_marker_icon_derives_from_slug() {
        let db = MockDb::default();
        let category = create_new_category(
            &db,
            NewCategory {
                name: "Gastronomía".into(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!("gastronomia", category.slug);
        assert_eq!("gastronomia", category.marker_icon.slug);
        assert_eq!(38, category.marker_icon.original_width);
        assert_eq!(38, category.marker_icon.scaled_width());
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let db = MockDb::default();
        let new_category = NewCategory {
            name: "Gastronomía".into(),
            ..Default::default()
        };
        assert!(create_new_category(&db, new_category.clone()).is_ok());
        assert!(matches!(
            create_new_category(&db, new_category),
            Err(Error::Repo(RepoError::AlreadyExists))
        ));
    }

    #[test]
    fn reject_blank_names() {
        let db = MockDb::default();
        assert!(matches!(
            create_new_category(
                &db,
                NewCategory {
                    name: "  ".into(),
                    ..Default::default()
                }
            ),
            Err(Error::Title)
        ));
    }
}
