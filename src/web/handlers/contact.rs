use actix_web::http::StatusCode;
use actix_web::{HttpRequest, Responder, get, post, web};

use pressroom::models::ContactInput;
use pressroom::services::Clock;

use crate::web::helpers::{render, render_status};
use crate::web::security::{SUBMISSION_LIMIT, client_key};
use crate::web::state::AppState;
use crate::web::templates::ContactTemplate;

#[get("/contact")]
pub async fn contact_form(state: web::Data<AppState>) -> impl Responder {
    render(ContactTemplate {
        site_name: state.site.name.clone(),
        form: ContactInput::default(),
        error: None,
        sent: false,
    })
}

#[post("/contact")]
pub async fn contact_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ContactInput>,
) -> impl Responder {
    let form = form.into_inner();
    let failed = |status: StatusCode, message: String, form: ContactInput| {
        render_status(
            status,
            ContactTemplate {
                site_name: state.site.name.clone(),
                form,
                error: Some(message),
                sent: false,
            },
        )
    };

    if !state
        .rate_limiter
        .check(&client_key(&req, "contact"), SUBMISSION_LIMIT)
    {
        return failed(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many messages. Please try again later.".to_string(),
            form,
        );
    }

    let data = match form.validate() {
        Ok(data) => data,
        Err(e) => return failed(StatusCode::UNPROCESSABLE_ENTITY, e.user_message(), form),
    };

    match state.store.create_contact(&data, state.clock.now()).await {
        Ok(contact) => {
            log::info!("Received contact submission {}", contact.id);
            render(ContactTemplate {
                site_name: state.site.name.clone(),
                form: ContactInput::default(),
                error: None,
                sent: true,
            })
        }
        Err(e) => {
            log::error!("Failed to store contact submission: {}", e);
            failed(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send message. Please try again.".to_string(),
                form,
            )
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(contact_form).service(contact_submit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::state::testing::test_app;
    use actix_web::{App, test};
    use pressroom::db::ContactStore;
    use pressroom::models::ContactStatus;

    #[actix_web::test]
    async fn stores_new_contact() {
        let t = test_app();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(t.state.clone()))
                .configure(configure),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/contact")
                .set_form([
                    ("name", "Ann"),
                    ("email", "ann@example.com"),
                    ("phone", ""),
                    ("subject", "Pricing"),
                    ("message", "How much?"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let contacts = t.store.list_contacts().await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].status, ContactStatus::New);
        assert_eq!(contacts[0].phone, None);
    }

    #[actix_web::test]
    async fn bad_email_is_rejected() {
        let t = test_app();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(t.state.clone()))
                .configure(configure),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/contact")
                .set_form([("name", "Ann"), ("email", "nope"), ("subject", "Hi"), ("message", "Hi")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(t.store.list_contacts().await.unwrap().is_empty());
    }
}
