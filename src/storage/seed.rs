//! Curated starter collection inserted into an empty `books` table.

use crate::domain::book::{NewBook, Status};

// (title, author, genre, year, status, rating)
const SEED: &[(&str, &str, &str, i32, Status, Option<i32>)] = &[
    ("Dune", "Frank Herbert", "Science Fiction", 1965, Status::Finished, Some(5)),
    ("The Left Hand of Darkness", "Ursula K. Le Guin", "Science Fiction", 1969, Status::Finished, Some(5)),
    ("Neuromancer", "William Gibson", "Science Fiction", 1984, Status::Finished, Some(4)),
    ("Foundation", "Isaac Asimov", "Science Fiction", 1951, Status::Reading, None),
    ("Hyperion", "Dan Simmons", "Science Fiction", 1989, Status::Unread, None),
    ("The Dispossessed", "Ursula K. Le Guin", "Science Fiction", 1974, Status::Unread, None),
    ("The Hobbit", "J. R. R. Tolkien", "Fantasy", 1937, Status::Finished, Some(5)),
    ("A Wizard of Earthsea", "Ursula K. Le Guin", "Fantasy", 1968, Status::Finished, Some(4)),
    ("The Name of the Wind", "Patrick Rothfuss", "Fantasy", 2007, Status::Finished, Some(4)),
    ("Piranesi", "Susanna Clarke", "Fantasy", 2020, Status::Reading, None),
    ("Pride and Prejudice", "Jane Austen", "Classic", 1813, Status::Finished, Some(5)),
    ("Moby-Dick", "Herman Melville", "Classic", 1851, Status::Unread, None),
    ("Don Quixote", "Miguel de Cervantes", "Classic", 1605, Status::Unread, None),
    ("Jane Eyre", "Charlotte Brontë", "Classic", 1847, Status::Finished, Some(4)),
    ("Middlemarch", "George Eliot", "Classic", 1871, Status::Reading, None),
    ("Nineteen Eighty-Four", "George Orwell", "Dystopian", 1949, Status::Finished, Some(5)),
    ("Brave New World", "Aldous Huxley", "Dystopian", 1932, Status::Finished, Some(3)),
    ("Fahrenheit 451", "Ray Bradbury", "Dystopian", 1953, Status::Finished, Some(4)),
    ("The Handmaid's Tale", "Margaret Atwood", "Dystopian", 1985, Status::Unread, None),
    ("The Road", "Cormac McCarthy", "Literary Fiction", 2006, Status::Finished, Some(4)),
    ("Beloved", "Toni Morrison", "Literary Fiction", 1987, Status::Unread, None),
    ("One Hundred Years of Solitude", "Gabriel García Márquez", "Literary Fiction", 1967, Status::Finished, Some(5)),
    ("The Remains of the Day", "Kazuo Ishiguro", "Literary Fiction", 1989, Status::Finished, Some(4)),
    ("The Hound of the Baskervilles", "Arthur Conan Doyle", "Mystery", 1902, Status::Finished, Some(3)),
    ("The Murder of Roger Ackroyd", "Agatha Christie", "Mystery", 1926, Status::Unread, None),
    ("The Name of the Rose", "Umberto Eco", "Mystery", 1980, Status::Reading, None),
    ("Sapiens", "Yuval Noah Harari", "Nonfiction", 2011, Status::Finished, Some(3)),
    ("The Structure of Scientific Revolutions", "Thomas S. Kuhn", "Nonfiction", 1962, Status::Unread, None),
    ("Gödel, Escher, Bach", "Douglas Hofstadter", "Nonfiction", 1979, Status::Reading, None),
    ("The Pragmatic Programmer", "Andrew Hunt and David Thomas", "Nonfiction", 1999, Status::Finished, Some(4)),
];

/// The seed set in insertion order.
pub fn seed_books() -> Vec<NewBook> {
    SEED.iter()
        .map(|&(title, author, genre, year, status, rating)| NewBook {
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            year,
            status,
            rating,
            image_url: String::new(),
        })
        .collect()
}
