//! Built-in passages served when no persisted index can be read.

use sitechat_domain::{Passage, PassageSource};

const DEFAULT_PASSAGES: [(&str, &str, &str); 7] = [
	(
		"About GaoTech",
		"https://gaotech.com/about",
		"GaoTech is a leading provider of Real Estate IoT solutions and smart building technologies. We specialize in transforming traditional buildings into intelligent, connected spaces.",
	),
	(
		"IoT Solutions",
		"https://gaotech.com/iot-solutions",
		"GaoTech's comprehensive IoT solutions transform buildings into intelligent, connected environments. Our offerings include: Smart Environmental Sensors for real-time monitoring of temperature, humidity, air quality, and occupancy levels; Automated Lighting Systems with motion detection, daylight harvesting, and energy-efficient LED controls; Intelligent HVAC Control featuring zone-based climate management, predictive scheduling, and energy optimization; Advanced Security Monitoring with smart cameras, access control, intrusion detection, and mobile alerts; Energy Management Systems providing detailed consumption analytics, peak demand management, and automated load balancing; Water Management Solutions including leak detection, usage monitoring, and conservation automation. All systems integrate seamlessly through our centralized IoT platform, providing building owners with complete visibility and control while reducing operational costs by up to 35%.",
	),
	(
		"Smart Buildings",
		"https://gaotech.com/smart-buildings",
		"GaoTech's smart building technologies create intelligent, responsive environments that adapt to occupant needs while maximizing efficiency. Our comprehensive smart building solutions include: Automated Lighting Control with occupancy sensors, daylight harvesting, and circadian rhythm optimization; Intelligent HVAC Systems featuring predictive climate control, zone-based management, and air quality monitoring; Energy Optimization through real-time consumption tracking, demand response automation, and renewable energy integration; Advanced Security Integration combining access control, video surveillance, intrusion detection, and emergency response systems; Real-time Monitoring Dashboards providing building managers with comprehensive insights into all building systems; Space Utilization Analytics to optimize office layouts and resource allocation; Predictive Maintenance Systems that identify potential issues before they become costly problems. Our smart building platform integrates all these technologies into a unified ecosystem, typically resulting in 25-40% energy savings and significantly improved occupant comfort and productivity.",
	),
	(
		"Property Management Services",
		"https://gaotech.com/services",
		"GaoTech provides comprehensive real estate technology services designed to revolutionize property management. Our services include: Advanced Property Management Systems that streamline operations and automate routine tasks; Tenant Engagement Platforms featuring mobile apps, digital communication tools, and service request portals; Maintenance Automation with predictive maintenance scheduling, work order management, and vendor coordination; Building Performance Analytics offering real-time dashboards, energy usage reports, and operational insights; Smart Building Integration connecting all systems for centralized control; and 24/7 Technical Support ensuring your systems run smoothly. Our solutions are designed to increase operational efficiency by up to 40% while improving tenant satisfaction and reducing costs.",
	),
	(
		"Energy Management",
		"https://gaotech.com/energy",
		"GaoTech's energy management solutions help reduce building operating costs by up to 30% through intelligent monitoring, automated controls, and predictive maintenance.",
	),
	(
		"Property Management",
		"https://gaotech.com/property-management",
		"Our property management platform integrates with existing building systems to provide centralized control, automated reporting, and enhanced tenant experiences.",
	),
	(
		"Contact",
		"https://gaotech.com/contact",
		"Contact GaoTech for more information about our smart building solutions and IoT implementations. We offer free consultations and custom solution design.",
	),
];

pub fn default_passages() -> Vec<Passage> {
	DEFAULT_PASSAGES
		.iter()
		.enumerate()
		.map(|(global_chunk_id, (title, url, text))| {
			let source = PassageSource {
				url: url.to_string(),
				title: title.to_string(),
				..Default::default()
			};
			let mut passage = Passage::new(text.to_string(), source, 0);

			passage.global_chunk_id = global_chunk_id;

			passage
		})
		.collect()
}
