//! 样例书目数据

use super::types::Book;

/// 样例数据中的记录数量
pub const SAMPLE_BOOK_COUNT: usize = 12;

/// 返回写入集合的固定样例书目
pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new("The Silent Orchard", "Amara Lindqvist", "Fiction", 2018, 14.99, true, 320, "Harbor Lane Press"),
        Book::new("Memoirs of a Voyager", "Tomas Reyes", "Biography", 2009, 18.50, false, 412, "Northwind Books"),
        Book::new("Quantum Gardens", "Priya Natarajan", "Science", 2021, 24.00, true, 288, "Meridian House"),
        Book::new("The Clockmaker's Daughter", "Amara Lindqvist", "Fiction", 2014, 12.75, true, 356, "Harbor Lane Press"),
        Book::new("Shadows over Kestrel Bay", "Jonah Whitfield", "Mystery", 2016, 9.99, true, 298, "Blackthorn Publishing"),
        Book::new("Patterns of the Deep", "Priya Natarajan", "Science", 2012, 21.40, false, 344, "Meridian House"),
        Book::new("Echoes in the Archive", "Amara Lindqvist", "Mystery", 2020, 16.25, true, 376, "Blackthorn Publishing"),
        Book::new("A Brief History of Lanterns", "Tomas Reyes", "History", 1998, 11.00, true, 240, "Northwind Books"),
        Book::new("The Last Cartographer", "Jonah Whitfield", "Fiction", 2022, 19.95, true, 402, "Harbor Lane Press"),
        Book::new("Winter of the Wolves", "Helena Okafor", "Fantasy", 2019, 22.50, false, 512, "Silverleaf Press"),
        Book::new("Ironwood Chronicles", "Helena Okafor", "Fantasy", 2005, 15.00, true, 448, "Silverleaf Press"),
        Book::new("Notes from a Quiet City", "Marcus Bell", "Biography", 2015, 13.20, true, 268, "Northwind Books"),
    ]
}
