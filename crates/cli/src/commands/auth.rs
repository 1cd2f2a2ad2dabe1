//! Account and session commands.

use emporium_core::{Credentials, ProfileUpdate, RegisterRequest};
use emporium_storefront::Storefront;
use emporium_storefront::error::Result;

use crate::render;

pub async fn register(
    shop: &Storefront,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> Result<()> {
    let user = shop
        .auth()
        .register(RegisterRequest {
            first_name,
            last_name,
            email,
            password,
        })
        .await?;
    render::line("Registered and signed in as:");
    render::user(&user);
    Ok(())
}

pub async fn login(shop: &Storefront, email: String, password: String) -> Result<()> {
    let user = shop.auth().login(Credentials { email, password }).await?;
    render::line("Signed in as:");
    render::user(&user);
    Ok(())
}

pub async fn logout(shop: &Storefront) {
    shop.auth().logout().await;
    render::line("Signed out");
}

pub fn whoami(shop: &Storefront) {
    match shop.auth().current_user() {
        Some(user) => render::user(&user),
        None => render::line("Not signed in"),
    }
}

pub async fn update(
    shop: &Storefront,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let user = shop
        .auth()
        .update_profile(ProfileUpdate {
            name,
            email,
            password,
        })
        .await?;
    render::line("Profile updated:");
    render::user(&user);
    Ok(())
}
