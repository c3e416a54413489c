use super::*;

#[post("/login", format = "application/json", data = "<login>")]
pub fn post_login(
    db: sqlite::Connections,
    cookies: &CookieJar<'_>,
    login: JsonResult<json::Credentials>,
    jwt_state: &State<jwt::JwtState>,
) -> Result<Option<json::JwtToken>> {
    let login = login?.into_inner();
    {
        let credentials = usecases::Credentials {
            email: &login.email.parse()?,
            password: &login.password,
        };
        usecases::login_with_email(&db.shared()?, &credentials).map_err(|err| {
            log::debug!("Login with email '{}' failed: {}", login.email, err);
            err
        })?;
    }

    let mut response = None;
    if cfg!(feature = "jwt") {
        let token = jwt_state.generate_token(&login.email)?;
        response = Some(json::JwtToken { token });
    }
    if cfg!(feature = "cookies") {
        cookies.add_private(
            Cookie::build((COOKIE_EMAIL_KEY, login.email))
                .same_site(rocket::http::SameSite::None),
        );
    }
    Ok(Json(response))
}

#[post("/logout", format = "application/json")]
pub fn post_logout(
    auth: Auth,
    cookies: &CookieJar<'_>,
    jwt_state: &State<jwt::JwtState>,
) -> Json<()> {
    cookies.remove_private(COOKIE_EMAIL_KEY);
    if cfg!(feature = "jwt") {
        for bearer in auth.bearer_tokens() {
            jwt_state.blacklist_token(bearer.to_owned());
        }
    }
    Json(())
}

#[post("/users", format = "application/json", data = "<new_user>")]
pub fn post_user(db: sqlite::Connections, new_user: JsonResult<json::NewUser>) -> Result<()> {
    let new_user = new_user?.into_inner();
    let new_user = usecases::NewUser {
        email: new_user.email.parse()?,
        password: new_user.password,
    };
    flows::create_user(&db, new_user)?;
    Ok(Json(()))
}

#[get("/users/current", format = "application/json")]
pub fn get_current_user(db: sqlite::Connections, account: Account) -> Result<json::User> {
    let email = account.email_address()?;
    let user = usecases::get_user(&db.shared()?, &email, &email)?;
    Ok(Json(to_json::user(user)))
}

#[delete("/users/<email>")]
pub fn delete_user(db: sqlite::Connections, account: Account, email: String) -> Result<()> {
    flows::delete_user(&db, &account.email_address()?, &email.parse()?)?;
    Ok(Json(()))
}
