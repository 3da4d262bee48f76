mod in_memory;
mod postgres;

pub use in_memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;
