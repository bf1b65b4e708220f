//! Init command implementation.

use crate::domain::AppError;

pub fn run_init() -> Result<(), AppError> {
    let created = crate::app::api::init()?;
    for path in &created {
        println!("  Created {}", path.display());
    }
    println!("✅ Initialized context-forge documents");
    Ok(())
}
