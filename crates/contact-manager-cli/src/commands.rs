use anyhow::Result;
use contact_manager_api::data::{Contact, ContactDraft, ContactId, FilterSelector};
use contact_manager_api::service::ServiceContext;
use contact_manager_api::service::notification::{Notification, NotificationKind};
use contact_manager_api::views::{AddContactView, ContactDetailView, ContactListView};
use log::error;

/// Fields to change with `edit`, `None` keeps the current value
#[derive(Debug, Default)]
pub struct EditChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_favorite: Option<bool>,
    pub is_blocked: Option<bool>,
}

impl EditChanges {
    fn apply(self, draft: &mut ContactDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(email) = self.email {
            draft.email = email;
        }
        if let Some(phone) = self.phone {
            draft.phone = phone;
        }
        if let Some(is_favorite) = self.is_favorite {
            draft.is_favorite = is_favorite;
        }
        if let Some(is_blocked) = self.is_blocked {
            draft.is_blocked = is_blocked;
        }
    }
}

fn format_contact(contact: &Contact) -> String {
    let mut flags = Vec::new();
    if contact.is_favorite {
        flags.push("favorite");
    }
    if contact.is_blocked {
        flags.push("blocked");
    }
    let mut line = format!(
        "{:>6}  {}  {}",
        contact.id.as_str(),
        contact.name,
        contact.phone
    );
    if !contact.email.is_empty() {
        line.push_str(&format!("  <{}>", contact.email));
    }
    if !flags.is_empty() {
        line.push_str(&format!("  [{}]", flags.join(", ")));
    }
    line
}

fn format_notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("✔ {}", notification.message),
        NotificationKind::Error => format!("✘ {}", notification.message),
    }
}

fn print_notification(notification: Option<Notification>) {
    if let Some(notification) = notification {
        println!("{}", format_notification(&notification));
    }
}

pub async fn list(ctx: &ServiceContext, filter: FilterSelector) -> Result<()> {
    let mut view = ContactListView::new(ctx.contact_store.clone(), ctx.notification_timer());
    view.refresh().await?;
    view.set_filter(filter);
    let contacts = view.visible();
    if contacts.is_empty() {
        println!("No contacts ({filter})");
    }
    for contact in contacts {
        println!("{}", format_contact(&contact));
    }
    Ok(())
}

/// Opens the detail view of a contact, loading the collection first
async fn open_detail(ctx: &ServiceContext, id: &ContactId) -> Result<ContactDetailView> {
    if let Err(e) = ctx.contact_store.load().await {
        // the contact is fetched on its own then
        error!("Could not load contacts: {e}");
    }
    Ok(ContactDetailView::open(ctx.contact_store.clone(), ctx.notification_timer(), id).await?)
}

pub async fn show(ctx: &ServiceContext, id: &ContactId) -> Result<()> {
    let view = open_detail(ctx, id).await?;
    println!("{}", format_contact(view.contact()));
    view.close();
    Ok(())
}

pub async fn add(ctx: &ServiceContext, draft: ContactDraft) -> Result<()> {
    let mut view = AddContactView::new(ctx.contact_store.clone(), ctx.notification_timer());
    view.set_name(draft.name);
    view.set_email(draft.email);
    view.set_phone(&draft.phone);
    if draft.is_favorite {
        view.toggle_draft_favorite();
    }
    view.set_blocked(draft.is_blocked);

    let res = view.submit().await;
    print_notification(view.current_notification());
    let contact = res?;
    println!("{}", format_contact(&contact));
    Ok(())
}

pub async fn edit(ctx: &ServiceContext, id: &ContactId, changes: EditChanges) -> Result<()> {
    let mut view = open_detail(ctx, id).await?;
    changes.apply(view.begin_edit());
    let res = view.submit_edit().await;
    print_notification(view.current_notification());
    println!("{}", format_contact(&res?));
    view.close();
    Ok(())
}

pub async fn favorite(ctx: &ServiceContext, id: &ContactId) -> Result<()> {
    let mut view = open_detail(ctx, id).await?;
    let res = view.toggle_favorite().await;
    print_notification(view.current_notification());
    println!("{}", format_contact(view.contact()));
    view.close();
    res?;
    Ok(())
}

pub async fn block(ctx: &ServiceContext, id: &ContactId) -> Result<()> {
    let mut view = open_detail(ctx, id).await?;
    let res = view.toggle_block().await;
    print_notification(view.current_notification());
    println!("{}", format_contact(view.contact()));
    view.close();
    res?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(is_favorite: bool, is_blocked: bool) -> Contact {
        Contact {
            id: ContactId::from("12"),
            name: "Ann".to_owned(),
            email: String::new(),
            phone: "0664123456".to_owned(),
            is_favorite,
            is_blocked,
        }
    }

    #[test]
    fn formats_contact() {
        assert_eq!(format_contact(&contact(false, false)), "    12  Ann  0664123456");
        let mut with_email = contact(true, true);
        with_email.email = "ann@example.com".to_owned();
        assert_eq!(
            format_contact(&with_email),
            "    12  Ann  0664123456  <ann@example.com>  [favorite, blocked]"
        );
    }

    #[test]
    fn edit_changes_only_touch_given_fields() {
        let mut draft = ContactDraft::from(&contact(false, false));
        EditChanges {
            name: Some("Anna".to_owned()),
            is_blocked: Some(true),
            ..Default::default()
        }
        .apply(&mut draft);
        assert_eq!(draft.name, "Anna");
        assert_eq!(draft.phone, "0664123456");
        assert!(draft.is_blocked);
        assert!(!draft.is_favorite);
    }
}
