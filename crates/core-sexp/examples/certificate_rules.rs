//! # Certificate Rules Example
//!
//! Builds a small rule set in code, then checks a few incoming queries
//! against it and prints each decision.
//!
//! ## Run
//!
//! ```bash
//! cargo run -p core-sexp --example certificate_rules
//! ```

use core_sexp::builder::{ListBuilder, RangeBuilder, SetBuilder};
use core_sexp::print::pretty;
use core_sexp::{authorize, parse, Comparator, Expression, RangeKind, RuleAuthorizer};

fn build_rules() -> Result<Vec<Expression>, core_sexp::ParseError> {
    let operators = ListBuilder::new("certificate")
        .with_list("issuer", |issuer| issuer.atom("bob"))
        .with_list("level", |level| {
            level.part(
                RangeBuilder::new(RangeKind::Numeric)
                    .bound(Comparator::Ge, "100")
                    .build()
                    .unwrap_or(Expression::Wildcard),
            )
        })
        .build();

    let office_hours = ListBuilder::new("certificate")
        .with_list("issuer", |issuer| issuer.atom("carol"))
        .part(
            ListBuilder::new("when")
                .part(
                    RangeBuilder::new(RangeKind::Time)
                        .bound(Comparator::Ge, "08:00:00")
                        .bound(Comparator::Lt, "18:00:00")
                        .build()?,
                )
                .build(),
        )
        .part(
            ListBuilder::new("fruit")
                .part(SetBuilder::new().atom("apple").atom("lemon").build()?)
                .build(),
        )
        .build();

    Ok(vec![operators, office_hours])
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rules = build_rules()?;
    println!("=== Rules ===");
    for rule in &rules {
        println!("{}\n", pretty(rule));
    }

    let queries: [&[u8]; 4] = [
        b"(11:certificate(6:issuer3:bob)(5:level3:250))",
        b"(11:certificate(6:issuer3:bob)(5:level2:42))",
        b"(11:certificate(6:issuer5:carol)(4:when8:09:15:00)(5:fruit5:lemon))",
        b"(11:certificate(6:issuer5:carol)(4:when8:09:15:00)(5:fruit4:pear))",
    ];

    let authorizer = RuleAuthorizer::new(&rules);
    println!("=== Queries ===");
    for bytes in queries {
        let query = parse(bytes)?;
        println!("{}", pretty(&query));
        for rule in &rules {
            match authorize(&query, rule) {
                Ok(decision) => println!("  -> {}", decision),
                Err(err) => println!("  -> not comparable: {}", err),
            }
        }
        println!("  allowed by rule set: {}\n", authorizer.is_allowed(&query));
    }

    Ok(())
}
