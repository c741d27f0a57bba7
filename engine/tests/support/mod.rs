use startup_survivor_core::{MonthDraft, OptionDraft, OptionId, Risk, Tag};

pub fn option(id: OptionId, tag: Tag, risk: Risk) -> OptionDraft {
    OptionDraft {
        id,
        title: format!("Option {id}: {tag}"),
        tag,
        risk,
        steps: vec![
            format!("commit the team to {tag}"),
            "review the numbers at month end".to_owned(),
        ],
        delayed_seed: format!("{tag} push has side effects"),
        result: String::new(),
    }
}

pub fn draft(month_id: u32) -> MonthDraft {
    let rotation = [Tag::Growth, Tag::Sales, Tag::Efficiency, Tag::Security, Tag::People];
    let first = rotation[(month_id as usize) % rotation.len()];
    let second = rotation[(month_id as usize + 2) % rotation.len()];
    MonthDraft {
        month_id,
        month_title: format!("Month {month_id}: Pressure builds"),
        situation: "Revenue is flat and the board wants a plan.".to_owned(),
        crisis_title: "A key customer threatens to leave".to_owned(),
        crisis: "They want a discount and a custom integration.".to_owned(),
        options: vec![
            option(OptionId::A, first, Risk::High),
            option(OptionId::B, second, Risk::Low),
            option(OptionId::C, Tag::Fundraising, Risk::Med),
        ],
        note: String::new(),
        cliffhanger: String::new(),
        lesson: String::new(),
        alternatives: Vec::new(),
    }
}
