mod common;

use actix_web::http::StatusCode;
use actix_web::test;

use common::{create_note, create_user, login_cookie, read_body_string, test_pool};
use kiroku::routes;

#[actix_web::test]
async fn the_list_shows_exactly_the_authors_notes_in_order() {
    let pool = test_pool();
    let author = create_user(&pool, "Notes Author");
    let random_person = create_user(&pool, "Random Person");
    for index in 0..3 {
        create_note(
            &pool,
            &author,
            &format!("Title {}", index),
            "Text",
            &format!("title{}", index),
        );
    }
    create_note(&pool, &random_person, "Foreign title", "Text", "foreign");
    let app = init_app!(pool);

    let req = test::TestRequest::get()
        .uri(routes::LIST)
        .cookie(login_cookie(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body_string(resp).await;
    assert_eq!(body.matches("<li class=\"note-item\"").count(), 3);
    for index in 0..3 {
        assert!(body.contains(&routes::detail(&format!("title{}", index))));
        assert!(body.contains(&format!("Title {}", index)));
    }
    assert!(!body.contains("Foreign title"));

    // insertion order
    let first = body.find("Title 0").unwrap();
    let second = body.find("Title 1").unwrap();
    let third = body.find("Title 2").unwrap();
    assert!(first < second && second < third);
}

#[actix_web::test]
async fn the_add_and_edit_pages_contain_the_note_form() {
    let pool = test_pool();
    let author = create_user(&pool, "Notes Author");
    let note = create_note(&pool, &author, "Title", "Text", "title");
    let app = init_app!(pool);

    for url in [routes::ADD.to_string(), routes::edit(&note.slug)] {
        let req = test::TestRequest::get()
            .uri(&url)
            .cookie(login_cookie(&author))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", url);

        let body = read_body_string(resp).await;
        assert!(body.contains("<form method=\"post\""), "GET {}", url);
        assert!(body.contains("name=\"title\""), "GET {}", url);
        assert!(body.contains("name=\"text\""), "GET {}", url);
        assert!(body.contains("name=\"slug\""), "GET {}", url);
    }
}

#[actix_web::test]
async fn the_edit_form_is_prefilled_with_the_stored_note() {
    let pool = test_pool();
    let author = create_user(&pool, "Notes Author");
    let note = create_note(&pool, &author, "Title", "Text", "title");
    let app = init_app!(pool);

    let req = test::TestRequest::get()
        .uri(&routes::edit(&note.slug))
        .cookie(login_cookie(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body_string(resp).await;
    assert!(body.contains("value=\"Title\""));
    assert!(body.contains(">Text</textarea>"));
    assert!(body.contains("value=\"title\""));
    assert!(body.contains(&format!("action=\"{}\"", routes::edit(&note.slug))));
}

#[actix_web::test]
async fn the_detail_page_shows_the_note() {
    let pool = test_pool();
    let author = create_user(&pool, "Notes Author");
    let note = create_note(
        &pool,
        &author,
        "Shopping list",
        "bread and cheese",
        "shopping-list",
    );
    let app = init_app!(pool);

    let req = test::TestRequest::get()
        .uri(&routes::detail(&note.slug))
        .cookie(login_cookie(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body_string(resp).await;
    assert!(body.contains("Shopping list"));
    assert!(body.contains("bread and cheese"));
    assert!(body.contains(&routes::edit(&note.slug)));
    assert!(body.contains(&routes::delete(&note.slug)));
}

#[actix_web::test]
async fn the_delete_page_asks_for_confirmation() {
    let pool = test_pool();
    let author = create_user(&pool, "Notes Author");
    let note = create_note(&pool, &author, "Old note", "Text", "old-note");
    let app = init_app!(pool);

    let req = test::TestRequest::get()
        .uri(&routes::delete(&note.slug))
        .cookie(login_cookie(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body_string(resp).await;
    assert!(body.contains("Old note"));
    assert!(body.contains(&format!("action=\"{}\"", routes::delete(&note.slug))));
    assert_eq!(common::note_count(&pool), 1, "looking is not deleting");
}

#[actix_web::test]
async fn note_text_is_escaped_on_the_detail_page() {
    let pool = test_pool();
    let author = create_user(&pool, "Notes Author");
    let note = create_note(
        &pool,
        &author,
        "Title",
        "<script>alert(1)</script>",
        "title",
    );
    let app = init_app!(pool);

    let req = test::TestRequest::get()
        .uri(&routes::detail(&note.slug))
        .cookie(login_cookie(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body = read_body_string(resp).await;
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;"));
}

#[actix_web::test]
async fn the_home_page_adapts_to_the_visitor() {
    let pool = test_pool();
    let user = create_user(&pool, "Notes Author");
    let app = init_app!(pool);

    let req = test::TestRequest::get().uri(routes::HOME).to_request();
    let resp = test::call_service(&app, req).await;
    let body = read_body_string(resp).await;
    assert!(body.contains(routes::LOGIN));
    assert!(!body.contains("Log out"));

    let req = test::TestRequest::get()
        .uri(routes::HOME)
        .cookie(login_cookie(&user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = read_body_string(resp).await;
    assert!(body.contains("Notes Author"));
    assert!(body.contains("Log out"));
}
