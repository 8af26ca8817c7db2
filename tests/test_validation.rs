//! Form validation: required fields, year/rating bounds, status enum.

use bookshelf::domain::validation::{validate_book_form, BookForm};
use bookshelf::Status;

fn form(year: &str, rating: &str) -> BookForm {
    BookForm {
        title: "  The Left Hand of Darkness ".to_string(),
        author: "Ursula K. Le Guin".to_string(),
        genre: "Science Fiction".to_string(),
        year: year.to_string(),
        status: "Finished".to_string(),
        rating: rating.to_string(),
        image_url: "".to_string(),
    }
}

#[test]
fn year_bounds_are_inclusive() {
    assert!(validate_book_form(&form("1400", "")).is_ok());
    assert!(validate_book_form(&form("2100", "")).is_ok());

    let low = validate_book_form(&form("1399", "")).unwrap_err();
    assert_eq!(low.get("year").unwrap(), "Year must be between 1400 and 2100.");
    let high = validate_book_form(&form("2101", "")).unwrap_err();
    assert!(high.contains("year"));
    assert_eq!(high.len(), 1);
}

#[test]
fn year_must_be_an_integer() {
    for bad in ["", "nineteen", "1969.5", " "] {
        let errors = validate_book_form(&form(bad, "")).unwrap_err();
        assert_eq!(errors.get("year").unwrap(), "Year must be a whole number.", "input {:?}", bad);
    }
    // Surrounding whitespace is tolerated.
    assert_eq!(validate_book_form(&form(" 1969 ", "")).unwrap().year, 1969);
}

#[test]
fn rating_bounds_and_empty_rating() {
    assert!(validate_book_form(&form("1969", "0")).unwrap_err().contains("rating"));
    assert!(validate_book_form(&form("1969", "6")).unwrap_err().contains("rating"));
    assert_eq!(
        validate_book_form(&form("1969", "6")).unwrap_err().get("rating").unwrap(),
        "Rating must be between 1 and 5."
    );
    assert_eq!(
        validate_book_form(&form("1969", "four")).unwrap_err().get("rating").unwrap(),
        "Rating must be a whole number."
    );

    assert_eq!(validate_book_form(&form("1969", "")).unwrap().rating, None);
    assert_eq!(validate_book_form(&form("1969", "   ")).unwrap().rating, None);
    assert_eq!(validate_book_form(&form("1969", "3")).unwrap().rating, Some(3));
}

#[test]
fn required_text_fields_are_trimmed() {
    let ok = validate_book_form(&form("1969", "5")).unwrap();
    assert_eq!(ok.title, "The Left Hand of Darkness");
    assert_eq!(ok.status, Status::Finished);

    let blank = BookForm {
        title: "   ".to_string(),
        author: "".to_string(),
        genre: "\t".to_string(),
        ..form("1969", "")
    };
    let errors = validate_book_form(&blank).unwrap_err();
    assert_eq!(errors.get("title").unwrap(), "Title is required.");
    assert_eq!(errors.get("author").unwrap(), "Author is required.");
    assert_eq!(errors.get("genre").unwrap(), "Genre is required.");
    assert_eq!(errors.len(), 3);
}

#[test]
fn status_must_be_a_known_value() {
    for bad in ["", "finished", "Done", "Reading "] {
        let mut f = form("1969", "");
        f.status = bad.to_string();
        // Trailing whitespace is trimmed, so "Reading " is the one accepted spelling here.
        if bad == "Reading " {
            assert_eq!(validate_book_form(&f).unwrap().status, Status::Reading);
        } else {
            let errors = validate_book_form(&f).unwrap_err();
            assert_eq!(errors.get("status").unwrap(), "Choose a valid status.", "input {:?}", bad);
        }
    }
}

#[test]
fn every_error_is_reported_at_once() {
    let f = BookForm {
        title: "".to_string(),
        author: "A".to_string(),
        genre: "G".to_string(),
        year: "99999".to_string(),
        status: "Lost".to_string(),
        rating: "10".to_string(),
        image_url: "   ".to_string(),
    };
    let errors = validate_book_form(&f).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(fields, vec!["rating", "status", "title", "year"]);
}

#[test]
fn image_url_is_not_validated() {
    let mut f = form("1969", "");
    f.image_url = "  not a url  ".to_string();
    assert_eq!(validate_book_form(&f).unwrap().image_url, "not a url");
}
