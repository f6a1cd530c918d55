//! Shared travel-booking fixture for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use ddd_semantics::adapters::ontology::InMemoryOntology;
use ddd_semantics::adapters::parser::Parser;
use ddd_semantics::domain::ddd::{Domain, PlanEntry, Preferred};
use ddd_semantics::domain::plan::{Plan, PlanItem};
use ddd_semantics::domain::semantics::{Goal, Proposition, Question};
use ddd_semantics::ports::Ontology;

pub const DDD_NAME: &str = "travel_ddd";
pub const DOMAIN_NAME: &str = "travel_domain";

pub fn ontology() -> Arc<InMemoryOntology> {
    Arc::new(
        InMemoryOntology::builder("travel_ontology")
            .sort("city")
            .sort("city_type")
            .sort("how")
            .dynamic_sort("passenger")
            .predicate("dest_city", "city")
            .predicate("dept_city", "city")
            .feature("dest_city_type", "city_type", "dest_city")
            .predicate("means_of_transport", "how")
            .predicate("price", "real")
            .predicate("number_of_passengers", "integer")
            .predicate("need_visa", "boolean")
            .predicate("selected_passenger", "passenger")
            .predicate("departure", "datetime")
            .individual("paris", "city")
            .individual("london", "city")
            .individual("gothenburg", "city")
            .individual("capital", "city_type")
            .individual("plane", "how")
            .individual("train", "how")
            .action("buy")
            .action("change_booking")
            .action("cancel_booking")
            .action("print_ticket")
            .build()
            .expect("travel ontology is valid"),
    )
}

/// Parses with the travel ontology; panics on malformed fixture text.
pub struct Notation {
    ontology: Arc<InMemoryOntology>,
}

impl Notation {
    pub fn new(ontology: Arc<InMemoryOntology>) -> Self {
        Self { ontology }
    }

    pub fn parser(&self) -> Parser<'_> {
        Parser::new(DDD_NAME, self.ontology.as_ref(), DOMAIN_NAME)
    }

    pub fn question(&self, text: &str) -> Question {
        self.parser().parse_question(text).expect(text)
    }

    pub fn goal(&self, text: &str) -> Goal {
        self.parser().parse_goal(text).expect(text)
    }

    pub fn proposition(&self, text: &str) -> Proposition {
        self.parser().parse_proposition(text).expect(text)
    }

    pub fn item(&self, text: &str) -> PlanItem {
        self.parser().parse_plan_item(text).expect(text)
    }

    pub fn plan(&self, items: &[&str]) -> Plan {
        Plan::new(items.iter().map(|text| self.item(text)).collect())
    }
}

pub struct Travel {
    pub ontology: Arc<InMemoryOntology>,
    pub notation: Notation,
    pub domain: Domain,
}

/// The travel domain:
///
/// - `perform(top)` offers buying a ticket or a price quote
/// - `resolve(?X.price(X))` asks destination, departure city and transport
/// - `perform(buy)` needs the price and books through a service action
/// - `perform(change_booking)` is preferred while a destination is known
/// - `perform(cancel_booking)` may be accommodated silently
/// - `perform(print_ticket)` asks the user to get the ticket printed
pub fn travel() -> Travel {
    let ontology = ontology();
    let notation = Notation::new(ontology.clone());
    let parser = notation.parser();

    let parameters = |text: &str| parser.parse_parameters(text).expect(text);

    let domain = Domain::builder(DDD_NAME, DOMAIN_NAME, ontology.clone() as Arc<dyn Ontology>)
        .plan(PlanEntry::new(
            notation.goal("perform(top)"),
            notation.plan(&["findout(?set([goal(perform(buy)), goal(resolve(?X.price(X)))]))"]),
        ))
        .plan(PlanEntry::new(
            notation.goal("resolve(?X.price(X))"),
            notation.plan(&[
                "findout(?X.dest_city(X))",
                "findout(?X.dept_city(X))",
                "if has_shared_value(dest_city) then findout(?X.means_of_transport(X)) else",
                "consultDB(?X.price(X))",
            ]),
        ))
        .plan(
            PlanEntry::new(
                notation.goal("perform(buy)"),
                notation.plan(&[
                    "findout(?X.price(X))",
                    "findout(?X.number_of_passengers(X))",
                    "invoke_service_action(MakeReservation, {preconfirm=interrogative})",
                ]),
            )
            .with_postplan(vec![notation.item("raise(?need_visa())")])
            .with_superactions(vec![ontology.action("top").expect("top")]),
        )
        .plan(
            PlanEntry::new(notation.goal("perform(change_booking)"), Plan::empty())
                .with_preference(Preferred::When(
                    parser.parse_condition("dest_city(paris)").expect("condition"),
                ))
                .with_postconds(vec![parser
                    .parse_condition("is_shared_commitment(dest_city(paris))")
                    .expect("condition")]),
        )
        .plan(
            PlanEntry::new(
                notation.goal("perform(cancel_booking)"),
                notation.plan(&["invoke_service_action(CancelBooking, {downdate_plan=False})"]),
            )
            .with_unrestricted_accommodation(true)
            .with_preference(Preferred::Always),
        )
        .plan(PlanEntry::new(
            notation.goal("perform(print_ticket)"),
            notation.plan(&["get_done(print_ticket, step=printer)"]),
        ))
        .default_question(notation.question("?X.dest_city(X)"))
        .dependency(
            notation.question("?X.price(X)"),
            vec![notation.question("?X.selected_passenger(X)")],
        )
        .question_parameters(
            notation.question("?X.dest_city(X)"),
            parameters("{verbalize=False, graphical_type=list, ask_features=[kpq(dept_city)], max_spoken_alts=2}"),
        )
        .question_parameters(
            notation.question("?X.price(X)"),
            parameters("{source=service, incremental=True, background=[dest_city, dept_city], sort_order=alphabetic}"),
        )
        .goal_parameters(
            notation.goal("perform(print_ticket)"),
            parameters("{allow_goal_accommodation=True}"),
        )
        .build()
        .expect("travel domain is valid");

    Travel {
        ontology,
        notation,
        domain,
    }
}
