//! 演示数据：用户 Test 的示例剧本 "The Investigation"

use crate::models::{Character, Location, Scene};

pub const SAMPLE_USER: &str = "Test";
pub const SAMPLE_PASSWORD: &str = "test123";
pub const SAMPLE_EMAIL: &str = "test@example.com";
pub const SAMPLE_SCRIPT_NAME: &str = "The Investigation";
pub const SAMPLE_SCRIPT_DESCRIPTION: &str = "A journalist uncovers government corruption";

pub fn sample_characters() -> Vec<Character> {
    vec![
        Character::new("Sarah Chen")
            .age(32)
            .description("Investigative journalist with sharp eyes and determination")
            .personality("Tenacious, curious, slightly cynical")
            .goals("Expose the truth about government corruption")
            .conflicts("Balancing career with personal safety"),
        Character::new("Detective Mike Rodriguez")
            .age(45)
            .description("Veteran detective with a weathered face and kind eyes")
            .personality("Wise, protective, slightly jaded")
            .goals("Solve the case and protect Sarah")
            .conflicts("Department politics vs. doing what's right"),
        Character::new("Senator James Whitmore")
            .age(58)
            .description("Powerful politician with expensive suits and cold demeanor")
            .personality("Calculating, ruthless, charming when needed")
            .goals("Maintain power and cover up corruption")
            .conflicts("Growing paranoia about being exposed"),
    ]
}

pub fn sample_locations() -> Vec<Location> {
    vec![
        Location::new(
            "City News Office",
            "Busy newsroom with desks, computers, and coffee machines",
        )
        .objects(&["desks", "computers", "coffee machines", "whiteboards"])
        .lighting("Fluorescent overhead lighting")
        .date_time("Day")
        .location_type("Indoor"),
        Location::new(
            "Police Station",
            "Old building with worn furniture and case files everywhere",
        )
        .objects(&["desks", "filing cabinets", "evidence bags", "coffee pot"])
        .lighting("Dim fluorescent lighting")
        .date_time("Day")
        .location_type("Indoor"),
        Location::new(
            "Senate Building",
            "Imposing government building with marble floors and security",
        )
        .objects(&[
            "marble floors",
            "security cameras",
            "expensive furniture",
            "portraits",
        ])
        .lighting("Elegant chandeliers")
        .date_time("Day")
        .location_type("Indoor"),
        Location::new(
            "Dark Alley",
            "Narrow alley with dumpsters and graffiti-covered walls",
        )
        .objects(&["dumpsters", "graffiti", "trash cans", "fire escapes"])
        .lighting("Street lights and shadows")
        .date_time("Night")
        .location_type("Outdoor"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn scene(
    number: u32,
    title: &str,
    location: &str,
    time_of_day: &str,
    tone_mood: &[&str],
    characters: &[&str],
    action: &str,
    goal: &str,
) -> Scene {
    let mut scene = Scene::new(number, title, location).with_action(action);
    scene.id = Some(number.to_string());
    scene.time_of_day = time_of_day.to_string();
    scene.tone_mood = tone_mood.iter().map(|t| t.to_string()).collect();
    scene.characters = characters.iter().map(|c| c.to_string()).collect();
    scene.goal = goal.to_string();
    scene
}

pub fn sample_scenes() -> Vec<Scene> {
    vec![
        scene(
            1,
            "The Tip",
            "City News Office",
            "Day",
            &["tense", "mysterious"],
            &["Sarah Chen"],
            "Sarah sits at her desk, surrounded by newspaper clippings. She's been working late, and the office is nearly empty. Her phone rings with an anonymous tip about government corruption.",
            "Introduce Sarah and the central mystery",
        ),
        scene(
            2,
            "Meeting the Detective",
            "Police Station",
            "Day",
            &["professional", "suspenseful"],
            &["Sarah Chen", "Detective Mike Rodriguez"],
            "Sarah meets Detective Rodriguez to discuss the case. He's initially skeptical but becomes intrigued by her evidence. They form an uneasy alliance.",
            "Establish the partnership between Sarah and Mike",
        ),
        scene(
            3,
            "The Senator's Office",
            "Senate Building",
            "Day",
            &["tense", "powerful"],
            &["Sarah Chen", "Senator James Whitmore"],
            "Sarah confronts Senator Whitmore with her findings. He denies everything but his nervous behavior reveals the truth. The tension builds as they engage in a verbal chess match.",
            "Show the confrontation and establish the antagonist",
        ),
        scene(
            4,
            "The Chase",
            "Dark Alley",
            "Night",
            &["action", "dangerous"],
            &["Sarah Chen", "Detective Mike Rodriguez"],
            "Sarah and Mike are chased through the dark alley by unknown assailants. They must work together to escape, revealing their growing trust and the danger they're in.",
            "Create action and show the stakes",
        ),
    ]
}

/// 场景模板名
pub const SCENE_TEMPLATES: [&str; 3] = ["Opening Scene", "Conflict Scene", "Resolution Scene"];

/// 按名称取场景模板，只填写标题、时间、基调、目标和冲突
pub fn scene_template(name: &str) -> Option<Scene> {
    let (tone, goal, conflict) = match name {
        "Opening Scene" => (
            "establishing",
            "Introduce the world and main character",
            "Establish the central conflict",
        ),
        "Conflict Scene" => (
            "tense",
            "Escalate the conflict",
            "Raise the stakes for the protagonist",
        ),
        "Resolution Scene" => (
            "hopeful",
            "Resolve the main conflict",
            "Final confrontation and resolution",
        ),
        _ => return None,
    };

    Some(Scene {
        title: name.to_string(),
        time_of_day: "Day".to_string(),
        tone_mood: vec![tone.to_string()],
        goal: goal.to_string(),
        conflict_stakes: conflict.to_string(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_template_resolves() {
        for name in SCENE_TEMPLATES {
            let scene = scene_template(name).unwrap();
            assert_eq!(scene.title, name);
            assert_eq!(scene.time_of_day, "Day");
            assert!(scene.scene_number.is_none());
        }
        assert!(scene_template("Montage").is_none());
    }

    #[test]
    fn sample_scenes_reference_sample_locations() {
        let locations: Vec<String> = sample_locations().into_iter().map(|l| l.name).collect();
        for scene in sample_scenes() {
            assert!(locations.contains(&scene.location));
        }
    }
}
